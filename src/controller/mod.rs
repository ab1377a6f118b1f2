// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Product lifecycle: start, stop and status against the workflow engine.
//!
//! A [`ProductController`] owns one product and its namespace. The
//! [`ControllerRegistry`] builds one controller per configured product, all
//! sharing a single engine client.

mod product;
mod registry;


pub use product::{
    ProductController, ProductState, StartOptions, StartOutcome, StopOutcome, TerminateResult,
};
pub use registry::ControllerRegistry;
