// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Step model, step catalog and the graph compiler that turns a product's
//! steps into an engine-ready workflow document.

mod catalog;
mod compiler;
mod document;
mod step;
mod validation;

pub use catalog::{catalog_for, multicast_address, Sizing, StepCatalog, StepParams};
pub use compiler::GraphCompiler;
pub use document::{
    Arguments, Container, DagTask, DagTemplate, GraphDocument, Inputs, ParameterBinding,
    ParameterDeclaration, Template, TtlStrategy, WorkflowMetadata, WorkflowSpec,
    WorkflowSubmission,
};
pub use step::{NamedParameter, ResourceSpec, Step, StepKind};
pub use validation::validate_step_graph;
