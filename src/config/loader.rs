// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{BATCH_COMPONENT, DEFAULT_TTL_SECONDS, REQUIRED_COMPONENTS};
use crate::errors::ConfigError;
use crate::workflow::ResourceSpec;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Static configuration for the product controller.
///
/// Loaded once at process start and never mutated afterwards. Every product
/// controller shares the same component definitions and engine endpoint.
///
/// # Example
/// ```yaml
/// engine:
///   url: http://argo-server:2746
///   token: "Bearer abc123"
/// ttl_seconds: 600
/// products:
///   array1:
///     namespace: array1
/// components:
///   telstate:
///     docker_image: redis:latest
///   calibrator:
///     docker_image: poccalibrator:0.1
///     resources:
///       limits:
///         cpu: 500m
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub engine: EngineConfig,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Append the batch-setup and batch worker stage to every compiled graph
    #[serde(default)]
    pub batch_stage: bool,
    #[serde(default)]
    pub products: BTreeMap<String, ProductConfig>,
    #[serde(default)]
    pub components: BTreeMap<String, ComponentConfig>,
}

fn default_ttl_seconds() -> u64 {
    DEFAULT_TTL_SECONDS
}

/// Where the workflow engine lives and how to talk to it.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub url: String,
    /// Sent verbatim as the `Authorization` header when present
    #[serde(default)]
    pub token: Option<String>,
    /// Transport timeout applied by the HTTP client; none when absent
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl EngineConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    pub namespace: String,
}

/// Container settings for one component (telstate, ingest, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentConfig {
    pub docker_image: String,
    #[serde(default)]
    pub resources: Option<ResourceSpec>,
}

impl Config {
    /// Look up a component by name.
    pub fn component(&self, name: &str) -> Result<&ComponentConfig, ConfigError> {
        self.components
            .get(name)
            .ok_or_else(|| ConfigError::MissingComponent {
                component: name.to_string(),
            })
    }

    /// Parse a config from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_yaml(&content)
}

/// Load a config from a YAML file and check it is usable.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Startup checks: engine url parses, at least one product with a namespace,
/// and every required component is configured (plus `batch` when the batch
/// stage is enabled).
pub fn validate_config(cfg: &Config) -> Result<(), ConfigError> {
    reqwest::Url::parse(&cfg.engine.url).map_err(|e| ConfigError::InvalidEngineUrl {
        url: cfg.engine.url.clone(),
        reason: e.to_string(),
    })?;

    if cfg.products.is_empty() {
        return Err(ConfigError::NoProducts);
    }

    if let Some((name, _)) = cfg
        .products
        .iter()
        .find(|(_, product)| product.namespace.trim().is_empty())
    {
        return Err(ConfigError::EmptyNamespace {
            product: name.clone(),
        });
    }

    for component in REQUIRED_COMPONENTS {
        cfg.component(component)?;
    }
    if cfg.batch_stage {
        cfg.component(BATCH_COMPONENT)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BASIC: &str = r#"
engine:
  url: http://argo-server:2746
products:
  array1:
    namespace: array1
  array2:
    namespace: array2
components:
  telstate:
    docker_image: redis:latest
  ingest:
    docker_image: pocingest:0.5
  calibrator:
    docker_image: poccalibrator:0.1
    resources:
      limits:
        cpu: 500m
        memory: 1Gi
        sdp.kat.ac.za/jellybeans: 1
  head:
    docker_image: pochead:0.1
  batch_setup:
    docker_image: pocbatch_setup:0.4
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_basic_config() {
        let cfg = Config::from_yaml(BASIC).unwrap();

        assert_eq!(cfg.engine.url, "http://argo-server:2746");
        assert_eq!(cfg.engine.token, None);
        assert_eq!(cfg.engine.timeout(), None);
        assert_eq!(cfg.ttl_seconds, DEFAULT_TTL_SECONDS);
        assert!(!cfg.batch_stage);
        assert_eq!(cfg.products.len(), 2);
        assert_eq!(cfg.products["array2"].namespace, "array2");
        assert_eq!(cfg.components.len(), 5);
    }

    #[test]
    fn numeric_resource_quantities_become_strings() {
        let cfg = Config::from_yaml(BASIC).unwrap();
        let resources = cfg.components["calibrator"].resources.as_ref().unwrap();

        assert_eq!(resources.limits["cpu"], "500m");
        assert_eq!(resources.limits["sdp.kat.ac.za/jellybeans"], "1");
        assert!(resources.requests.is_empty());
    }

    #[test]
    fn missing_component_is_reported_by_name() {
        let cfg = Config::from_yaml(BASIC).unwrap();
        let err = cfg.component("batch").unwrap_err();
        assert!(matches!(err, ConfigError::MissingComponent { ref component } if component == "batch"));
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let file = write_config(BASIC);
        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.products.len(), 2);
    }

    #[test]
    fn test_load_and_validate_missing_required_component() {
        let yaml = BASIC.replace("  batch_setup:\n    docker_image: pocbatch_setup:0.4\n", "");
        let file = write_config(&yaml);

        let err = load_and_validate_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("'batch_setup' is not configured"));
    }

    #[test]
    fn test_load_and_validate_batch_stage_needs_batch_component() {
        let yaml = format!("batch_stage: true\n{}", BASIC);
        let file = write_config(&yaml);

        let err = load_and_validate_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingComponent { ref component } if component == "batch"));

        let with_batch = format!("{}  batch:\n    docker_image: pocbatch:0.1\n", yaml);
        let file = write_config(&with_batch);
        assert!(load_and_validate_config(file.path()).unwrap().batch_stage);
    }

    #[test]
    fn test_load_and_validate_rejects_bad_engine_url() {
        let yaml = BASIC.replace("http://argo-server:2746", "not a url");
        let file = write_config(&yaml);

        let err = load_and_validate_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEngineUrl { .. }));
    }

    #[test]
    fn test_load_and_validate_rejects_empty_namespace() {
        let yaml = BASIC.replace("namespace: array2", "namespace: \"\"");
        let file = write_config(&yaml);

        let err = load_and_validate_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyNamespace { ref product } if product == "array2"));
    }

    #[test]
    fn test_load_and_validate_requires_products() {
        let yaml = r#"
engine:
  url: http://localhost:2746
components: {}
"#;
        let file = write_config(yaml);

        let err = load_and_validate_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NoProducts));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_engine_options() {
        let yaml = r#"
engine:
  url: http://localhost:2746
  token: Bearer abc
  timeout_seconds: 5
ttl_seconds: 60
batch_stage: true
"#;
        let cfg = Config::from_yaml(yaml).unwrap();

        assert_eq!(cfg.engine.token.as_deref(), Some("Bearer abc"));
        assert_eq!(cfg.engine.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(cfg.ttl_seconds, 60);
        assert!(cfg.batch_stage);
        assert!(cfg.products.is_empty());
    }
}
