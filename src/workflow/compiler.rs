// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! GraphCompiler — turns a validated step list into a workflow document
//!
//! - Dag tasks keep the catalog order (the engine orders by dependencies)
//! - Container templates are deduplicated by step kind; the first step of a
//!   kind defines the template every instance of that kind shares
//! - Input parameters become template input declarations, every parameter
//!   becomes a dag-task argument binding
//! - When-guards are copied verbatim onto the dag task

use std::collections::HashSet;

use crate::config::consts::{
    WORKFLOW_API_VERSION, WORKFLOW_KIND, WORKFLOW_NAME_PREFIX, WORKFLOW_SERVICE_ACCOUNT,
};
use crate::errors::GraphError;
use crate::observability::messages::compiler::GraphCompiled;
use crate::observability::messages::StructuredLog;
use crate::workflow::{
    validate_step_graph, Arguments, Container, DagTask, DagTemplate, GraphDocument, Inputs,
    ParameterBinding, ParameterDeclaration, Step, StepKind, Template, TtlStrategy,
    WorkflowMetadata, WorkflowSpec,
};

/// Compiles step lists for one namespace.
#[derive(Debug, Clone)]
pub struct GraphCompiler {
    namespace: String,
    ttl_seconds: u64,
}

impl GraphCompiler {
    pub fn new(namespace: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            namespace: namespace.into(),
            ttl_seconds,
        }
    }

    /// Workflow name, also used as the entrypoint template name.
    pub fn workflow_name(&self) -> String {
        format!("{}-{}", WORKFLOW_NAME_PREFIX, self.namespace)
    }

    /// Validate `steps` and compile them into a workflow document.
    ///
    /// Pure compilation; nothing is submitted anywhere.
    pub fn compile(&self, steps: &[Step]) -> Result<GraphDocument, GraphError> {
        validate_step_graph(steps)?;

        let name = self.workflow_name();
        let tasks: Vec<DagTask> = steps.iter().map(dag_task).collect();

        let mut templates = vec![Template {
            name: name.clone(),
            dag: Some(DagTemplate { tasks }),
            container: None,
            inputs: None,
            daemon: None,
            host_network: None,
        }];

        let mut seen_kinds: HashSet<StepKind> = HashSet::new();
        for step in steps {
            if seen_kinds.insert(step.kind) {
                templates.push(container_template(step));
            }
        }

        GraphCompiled {
            namespace: &self.namespace,
            workflow: &name,
            task_count: steps.len(),
            template_count: templates.len() - 1,
        }
        .log();

        Ok(GraphDocument {
            api_version: WORKFLOW_API_VERSION.to_string(),
            kind: WORKFLOW_KIND.to_string(),
            metadata: WorkflowMetadata {
                name: name.clone(),
                namespace: self.namespace.clone(),
            },
            spec: WorkflowSpec {
                entrypoint: name,
                service_account_name: WORKFLOW_SERVICE_ACCOUNT.to_string(),
                ttl_strategy: TtlStrategy::uniform(self.ttl_seconds),
                templates,
            },
        })
    }
}

fn dag_task(step: &Step) -> DagTask {
    let arguments = (!step.parameters.is_empty()).then(|| Arguments {
        parameters: step
            .parameters
            .iter()
            .map(|p| ParameterBinding {
                name: p.name.clone(),
                value: p.value.clone(),
            })
            .collect(),
    });

    DagTask {
        name: step.name.clone(),
        template: step.template_name.clone(),
        dependencies: step.dependencies.clone(),
        arguments,
        when: step.when_guard.clone(),
    }
}

fn container_template(step: &Step) -> Template {
    let declarations: Vec<ParameterDeclaration> = step
        .inputs()
        .map(|p| ParameterDeclaration {
            name: p.name.clone(),
        })
        .collect();

    let resources = step
        .resources
        .as_ref()
        .filter(|r| !r.is_empty())
        .map(|r| r.with_default_requests());

    Template {
        name: step.template_name.clone(),
        dag: None,
        container: Some(Container {
            image: step.image.clone(),
            command: step.command.clone(),
            args: step.container_args.clone(),
            resources,
        }),
        inputs: (!declarations.is_empty()).then_some(Inputs {
            parameters: declarations,
        }),
        daemon: step.daemon.then_some(true),
        host_network: step.host_network.then_some(true),
    }
}
