// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// A step list compiled into a workflow document.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use product_controller::observability::messages::compiler::GraphCompiled;
///
/// let msg = GraphCompiled {
///     namespace: "array1",
///     workflow: "product-controller-array1",
///     task_count: 4,
///     template_count: 4,
/// };
///
/// assert!(msg.to_string().contains("4 tasks"));
/// ```
pub struct GraphCompiled<'a> {
    pub namespace: &'a str,
    pub workflow: &'a str,
    pub task_count: usize,
    pub template_count: usize,
}

impl Display for GraphCompiled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Compiled workflow '{}' in namespace '{}': {} tasks, {} container templates",
            self.workflow, self.namespace, self.task_count, self.template_count
        )
    }
}

impl StructuredLog for GraphCompiled<'_> {
    fn log(&self) {
        tracing::debug!(
            namespace = self.namespace,
            workflow = self.workflow,
            task_count = self.task_count,
            template_count = self.template_count,
            "{}", self
        );
    }
}
