// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for product lifecycle operations.
//!
//! This module contains message types for logging events related to:
//! * Starting a product (compile and submit)
//! * Stopping a product (list and terminate)
//! * Building the controller registry

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A product start was requested.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use product_controller::observability::messages::controller::ProductStartRequested;
///
/// let msg = ProductStartRequested {
///     product: "array1",
///     namespace: "array1",
///     worker_count: 10,
///     dry_run: false,
/// };
///
/// assert!(msg.to_string().contains("10 workers"));
/// ```
pub struct ProductStartRequested<'a> {
    pub product: &'a str,
    pub namespace: &'a str,
    pub worker_count: u32,
    pub dry_run: bool,
}

impl Display for ProductStartRequested<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting product '{}' in namespace '{}' with {} workers",
            self.product, self.namespace, self.worker_count
        )?;
        if self.dry_run {
            write!(f, " (dry run)")?;
        }
        Ok(())
    }
}

impl StructuredLog for ProductStartRequested<'_> {
    fn log(&self) {
        tracing::info!(
            product = self.product,
            namespace = self.namespace,
            worker_count = self.worker_count,
            dry_run = self.dry_run,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "product_start",
            span_name = name,
            product = self.product,
            namespace = self.namespace,
            worker_count = self.worker_count,
        )
    }
}

/// The engine answered a workflow submission.
///
/// # Log Level
/// `info!` when accepted, `warn!` otherwise
pub struct WorkflowSubmitted<'a> {
    pub product: &'a str,
    pub workflow: &'a str,
    pub accepted: bool,
}

impl Display for WorkflowSubmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let verdict = if self.accepted { "accepted" } else { "not accepted" };
        write!(
            f,
            "Workflow '{}' for product '{}' {}",
            self.workflow, self.product, verdict
        )
    }
}

impl StructuredLog for WorkflowSubmitted<'_> {
    fn log(&self) {
        if self.accepted {
            tracing::info!(product = self.product, workflow = self.workflow, "{}", self);
        } else {
            tracing::warn!(product = self.product, workflow = self.workflow, "{}", self);
        }
    }
}

/// A product stop was requested.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ProductStopRequested<'a> {
    pub product: &'a str,
    pub namespace: &'a str,
}

impl Display for ProductStopRequested<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stopping product '{}' in namespace '{}'",
            self.product, self.namespace
        )
    }
}

impl StructuredLog for ProductStopRequested<'_> {
    fn log(&self) {
        tracing::info!(product = self.product, namespace = self.namespace, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "product_stop",
            span_name = name,
            product = self.product,
            namespace = self.namespace,
        )
    }
}

/// Termination requested for one listed workflow.
///
/// # Log Level
/// `info!` - Important operational event
pub struct WorkflowTerminated<'a> {
    pub namespace: &'a str,
    pub workflow: &'a str,
    pub accepted: bool,
}

impl Display for WorkflowTerminated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Terminate '{}' in namespace '{}': {}",
            self.workflow,
            self.namespace,
            if self.accepted { "accepted" } else { "not accepted" }
        )
    }
}

impl StructuredLog for WorkflowTerminated<'_> {
    fn log(&self) {
        tracing::info!(
            namespace = self.namespace,
            workflow = self.workflow,
            accepted = self.accepted,
            "{}", self
        );
    }
}

/// A listed workflow carried no name and was left alone.
///
/// # Log Level
/// `warn!` - Unexpected engine data
pub struct WorkflowItemSkipped<'a> {
    pub namespace: &'a str,
    pub position: usize,
}

impl Display for WorkflowItemSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping unnamed workflow at position {} in namespace '{}'",
            self.position, self.namespace
        )
    }
}

impl StructuredLog for WorkflowItemSkipped<'_> {
    fn log(&self) {
        tracing::warn!(namespace = self.namespace, position = self.position, "{}", self);
    }
}

/// The registry built one controller per configured product.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RegistryBuilt<'a> {
    pub engine_url: &'a str,
    pub product_count: usize,
}

impl Display for RegistryBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Built {} product controllers against engine {}",
            self.product_count, self.engine_url
        )
    }
}

impl StructuredLog for RegistryBuilt<'_> {
    fn log(&self) {
        tracing::info!(
            engine_url = self.engine_url,
            product_count = self.product_count,
            "{}", self
        );
    }
}
