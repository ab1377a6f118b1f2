// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Workflow document serialization types
//!
//! Typed representation of the engine's `argoproj.io/v1alpha1` Workflow
//! resource, restricted to the fields the compiler emits. Serializes to plain
//! JSON/YAML primitives.

use serde::{Deserialize, Serialize};

use crate::workflow::ResourceSpec;

/// Compiled workflow (`argoproj.io/v1alpha1` Kind: Workflow)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    pub api_version: String,
    pub kind: String,
    pub metadata: WorkflowMetadata,
    pub spec: WorkflowSpec,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    pub name: String,
    pub namespace: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSpec {
    pub entrypoint: String,
    pub service_account_name: String,
    pub ttl_strategy: TtlStrategy,
    /// The dag template first, then one container template per step kind
    pub templates: Vec<Template>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TtlStrategy {
    pub seconds_after_completion: u64,
    pub seconds_after_success: u64,
    pub seconds_after_failure: u64,
}

impl TtlStrategy {
    pub fn uniform(seconds: u64) -> Self {
        Self {
            seconds_after_completion: seconds,
            seconds_after_success: seconds,
            seconds_after_failure: seconds,
        }
    }
}

/// Either the dag entrypoint or a container definition shared by a step kind
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dag: Option<DagTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Inputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daemon: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_network: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DagTemplate {
    pub tasks: Vec<DagTask>,
}

/// One step reference inside the dag
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DagTask {
    pub name: String,
    pub template: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Arguments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Arguments {
    pub parameters: Vec<ParameterBinding>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterBinding {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inputs {
    pub parameters: Vec<ParameterDeclaration>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDeclaration {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceSpec>,
}

impl GraphDocument {
    /// Tasks of the entrypoint dag, in compiled order.
    pub fn dag_tasks(&self) -> &[DagTask] {
        self.template(&self.spec.entrypoint)
            .and_then(|t| t.dag.as_ref())
            .map(|dag| dag.tasks.as_slice())
            .unwrap_or_default()
    }

    /// Container templates, excluding the dag entrypoint.
    pub fn container_templates(&self) -> impl Iterator<Item = &Template> {
        self.spec.templates.iter().filter(|t| t.container.is_some())
    }

    pub fn template(&self, name: &str) -> Option<&Template> {
        self.spec.templates.iter().find(|t| t.name == name)
    }

    pub fn task(&self, name: &str) -> Option<&DagTask> {
        self.dag_tasks().iter().find(|t| t.name == name)
    }
}

/// Envelope the engine expects on workflow creation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSubmission {
    pub server_dry_run: bool,
    pub namespace: String,
    pub workflow: GraphDocument,
}
