// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Workflow engine backends.
//!
//! Each backend implements the [`WorkflowEngine`](crate::traits::WorkflowEngine)
//! trait and is shared by every product controller.
//!
//! ## HTTP Backend
//! Talks to the engine's REST API (`/api/v1/workflows/{namespace}`):
//! - **Create**: `POST` with the submission envelope
//! - **List**: `GET`, scoped to the namespace
//! - **Terminate**: `PUT .../{name}/terminate`
//! - Transport failures become `EngineReply::Unreachable`
//!
//! ## Stub Backend (Test-Only)
//! - **RecordingEngine**: scripted replies plus a log of every call made
//!
//! # Example
//! ```rust,no_run
//! use product_controller::backends::HttpWorkflowEngine;
//! use product_controller::traits::WorkflowEngine;
//!
//! # async fn run() -> Result<(), product_controller::errors::ControllerError> {
//! let engine = HttpWorkflowEngine::new("http://argo-server:2746", None, None)?;
//! let reply = engine.list("array1").await;
//! println!("{:?}", reply);
//! # Ok(())
//! # }
//! ```

pub mod http;
#[cfg(test)]
pub mod stub;

pub use http::HttpWorkflowEngine;
