// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Structural defects in a step list. These are programming or configuration
/// defects and are never repaired silently.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("Duplicate step name: '{name}'")]
    DuplicateStepName { name: String },

    #[error("Step '{step}' depends on '{dependency}' which does not exist")]
    DanglingDependency { step: String, dependency: String },

    #[error("Cyclic dependency detected: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },
}
