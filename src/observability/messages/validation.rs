// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for step graph validation failures.
//!
//! This module contains message types for logging events related to:
//! * Duplicate step name detection
//! * Dangling dependency detection
//! * Cyclic dependency detection

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cyclic dependency detected in a step graph.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use product_controller::observability::messages::validation::CyclicDependencyDetected;
///
/// let cycle = vec!["head", "ingest1", "head"];
/// let msg = CyclicDependencyDetected {
///     cycle: &cycle,
/// };
///
/// assert_eq!(msg.to_string(), "Cyclic dependency detected: head -> ingest1 -> head");
/// ```
pub struct CyclicDependencyDetected<'a> {
    pub cycle: &'a [&'a str],
}

impl Display for CyclicDependencyDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic dependency detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicDependencyDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
        )
    }
}

/// A step depends on a name that is not in the graph.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct DanglingDependency<'a> {
    pub step: &'a str,
    pub dependency: &'a str,
}

impl Display for DanglingDependency<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step '{}' depends on missing step '{}'",
            self.step, self.dependency
        )
    }
}

impl StructuredLog for DanglingDependency<'_> {
    fn log(&self) {
        tracing::error!(
            step = self.step,
            dependency = self.dependency,
            "{}", self
        );
    }
}

/// Two steps share a name.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct DuplicateStepName<'a> {
    pub name: &'a str,
}

impl Display for DuplicateStepName<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate step name: '{}'", self.name)
    }
}

impl StructuredLog for DuplicateStepName<'_> {
    fn log(&self) {
        tracing::error!(name = self.name, "{}", self);
    }
}
