// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::backends::HttpWorkflowEngine;
use crate::config::{validate_config, Config};
use crate::controller::{ProductController, StartOptions, StartOutcome, StopOutcome};
use crate::errors::ControllerError;
use crate::observability::messages::controller::RegistryBuilt;
use crate::observability::messages::StructuredLog;
use crate::traits::{EngineReply, WorkflowEngine};

/// Product name to controller, built once from configuration.
///
/// Every controller shares the same config and engine client.
pub struct ControllerRegistry {
    controllers: BTreeMap<String, ProductController>,
}

impl ControllerRegistry {
    /// Validate `config` and build controllers talking to its HTTP engine.
    pub fn from_config(config: Config) -> Result<Self, ControllerError> {
        validate_config(&config)?;
        let engine = HttpWorkflowEngine::from_config(&config.engine)?;
        Ok(Self::with_engine(config, Arc::new(engine)))
    }

    /// Build controllers around an already constructed engine.
    pub fn with_engine(config: Config, engine: Arc<dyn WorkflowEngine>) -> Self {
        let config = Arc::new(config);
        let controllers: BTreeMap<String, ProductController> = config
            .products
            .iter()
            .map(|(name, product)| {
                let controller = ProductController::new(
                    name.clone(),
                    product.namespace.clone(),
                    Arc::clone(&config),
                    Arc::clone(&engine),
                );
                (name.clone(), controller)
            })
            .collect();

        RegistryBuilt {
            engine_url: &config.engine.url,
            product_count: controllers.len(),
        }
        .log();

        Self { controllers }
    }

    pub fn get(&self, name: &str) -> Result<&ProductController, ControllerError> {
        self.controllers
            .get(name)
            .ok_or_else(|| ControllerError::UnknownProduct {
                name: name.to_string(),
            })
    }

    pub async fn start(
        &self,
        name: &str,
        options: StartOptions,
    ) -> Result<StartOutcome, ControllerError> {
        self.get(name)?.start(options).await
    }

    pub async fn stop(&self, name: &str) -> Result<StopOutcome, ControllerError> {
        Ok(self.get(name)?.stop().await)
    }

    pub async fn status(&self, name: &str) -> Result<EngineReply, ControllerError> {
        Ok(self.get(name)?.status().await)
    }

    /// Configured product names, sorted.
    pub fn product_names(&self) -> Vec<&str> {
        self.controllers.keys().map(String::as_str).collect()
    }

    /// Products the engine reports as running. Queried one at a time;
    /// unreachable or rejected listings count as not running.
    pub async fn active_products(&self) -> Vec<String> {
        let mut active = Vec::new();
        for (name, controller) in &self.controllers {
            if controller.state().await.is_running() {
                active.push(name.clone());
            }
        }
        active
    }
}
