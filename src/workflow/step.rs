// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::consts::{
    BATCH_COMPONENT, BATCH_SETUP_COMPONENT, CALIBRATOR_COMPONENT, HEAD_COMPONENT,
    INGEST_COMPONENT, TELSTATE_COMPONENT,
};

/// The fixed set of step kinds a product graph is built from.
///
/// All instances of one kind share a single container template in the
/// compiled document; only names, parameters and dependencies vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepKind {
    Telstate,
    Ingest,
    Calibrator,
    Head,
    BatchSetup,
    Batch,
}

impl StepKind {
    /// Name of the component config this kind draws its image and resources from.
    pub fn component(self) -> &'static str {
        match self {
            StepKind::Telstate => TELSTATE_COMPONENT,
            StepKind::Ingest => INGEST_COMPONENT,
            StepKind::Calibrator => CALIBRATOR_COMPONENT,
            StepKind::Head => HEAD_COMPONENT,
            StepKind::BatchSetup => BATCH_SETUP_COMPONENT,
            StepKind::Batch => BATCH_COMPONENT,
        }
    }

    pub fn template_name(self) -> &'static str {
        match self {
            StepKind::Telstate => "telstate-template",
            StepKind::Ingest => "ingest-template",
            StepKind::Calibrator => "calibrator-template",
            StepKind::Head => "head-template",
            StepKind::BatchSetup => "batch-setup-template",
            StepKind::Batch => "batch-template",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Telstate => "telstate",
            StepKind::Ingest => "ingest",
            StepKind::Calibrator => "calibrator",
            StepKind::Head => "head",
            StepKind::BatchSetup => "batch-setup",
            StepKind::Batch => "batch",
        };
        f.write_str(name)
    }
}

/// A parameter bound on a step. Input parameters are also declared on the
/// kind's template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedParameter {
    pub name: String,
    pub value: String,
    pub is_input: bool,
}

/// Kubernetes-style resource limits and requests.
///
/// Quantities may be written as strings or bare numbers in YAML; both are
/// stored as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "deserialize_quantities"
    )]
    pub limits: BTreeMap<String, String>,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "deserialize_quantities"
    )]
    pub requests: BTreeMap<String, String>,
}

impl ResourceSpec {
    /// Copy with requests defaulted to limits when only limits are given.
    pub fn with_default_requests(&self) -> ResourceSpec {
        let mut resolved = self.clone();
        if resolved.requests.is_empty() && !resolved.limits.is_empty() {
            resolved.requests = resolved.limits.clone();
        }
        resolved
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty() && self.requests.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Quantity {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<Quantity> for String {
    fn from(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Text(text) => text,
            Quantity::Integer(n) => n.to_string(),
            Quantity::Float(n) => n.to_string(),
        }
    }
}

fn deserialize_quantities<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Quantity>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.into())).collect())
}

/// One task instance in a product graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub name: String,
    pub kind: StepKind,
    pub template_name: String,
    pub image: String,
    pub command: Vec<String>,
    pub container_args: Vec<String>,
    pub parameters: Vec<NamedParameter>,
    /// Names of steps that must be complete (or running, for daemons) first.
    /// Kept in insertion order without repeats.
    pub dependencies: Vec<String>,
    pub resources: Option<ResourceSpec>,
    pub daemon: bool,
    pub host_network: bool,
    /// Predicate evaluated by the engine; passed through untouched
    pub when_guard: Option<String>,
}

impl Step {
    pub fn new(name: impl Into<String>, kind: StepKind, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            template_name: kind.template_name().to_string(),
            image: image.into(),
            command: Vec::new(),
            container_args: Vec::new(),
            parameters: Vec::new(),
            dependencies: Vec::new(),
            resources: None,
            daemon: false,
            host_network: false,
            when_guard: None,
        }
    }

    /// Bind a named input parameter.
    pub fn push_input(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.push(NamedParameter {
            name: name.into(),
            value: value.into(),
            is_input: true,
        });
    }

    /// Bind an unnamed positional argument. Its name is `{step}-{index}`,
    /// where index counts the parameters already attached.
    pub fn push_positional(&mut self, value: impl Into<String>) {
        let name = format!("{}-{}", self.name, self.parameters.len());
        self.parameters.push(NamedParameter {
            name,
            value: value.into(),
            is_input: false,
        });
    }

    pub fn depends_on(&mut self, dependency: impl Into<String>) {
        let dependency = dependency.into();
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
        }
    }

    pub fn inputs(&self) -> impl Iterator<Item = &NamedParameter> {
        self.parameters.iter().filter(|p| p.is_input)
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_names_are_deterministic() {
        let mut step = Step::new("ingest1", StepKind::Ingest, "img");
        step.push_positional("./run.sh");
        step.push_positional("-u");
        step.push_input("tasks-telstate-ip", "{{tasks.telstate.ip}}");

        let names: Vec<&str> = step.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ingest1-0", "ingest1-1", "tasks-telstate-ip"]);
        assert_eq!(step.inputs().count(), 1);
        assert_eq!(step.parameter("ingest1-0"), Some("./run.sh"));
    }

    #[test]
    fn dependencies_do_not_repeat() {
        let mut step = Step::new("head", StepKind::Head, "img");
        step.depends_on("ingest1");
        step.depends_on("calibrator1");
        step.depends_on("ingest1");

        assert_eq!(step.dependencies, vec!["ingest1", "calibrator1"]);
    }

    #[test]
    fn requests_default_to_limits() {
        let spec = ResourceSpec {
            limits: BTreeMap::from([("cpu".to_string(), "500m".to_string())]),
            requests: BTreeMap::new(),
        };

        let resolved = spec.with_default_requests();
        assert_eq!(resolved.requests, spec.limits);
        assert!(spec.requests.is_empty());
    }

    #[test]
    fn explicit_requests_are_kept() {
        let spec = ResourceSpec {
            limits: BTreeMap::from([("cpu".to_string(), "1".to_string())]),
            requests: BTreeMap::from([("cpu".to_string(), "250m".to_string())]),
        };

        assert_eq!(spec.with_default_requests(), spec);
    }

    #[test]
    fn kinds_map_to_components_and_templates() {
        assert_eq!(StepKind::BatchSetup.component(), "batch_setup");
        assert_eq!(StepKind::BatchSetup.template_name(), "batch-setup-template");
        assert_eq!(StepKind::Calibrator.to_string(), "calibrator");
    }
}
