// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! Log events are struct-based message types implementing `Display` and
//! [`messages::StructuredLog`], so every event carries the same fields and
//! wording wherever it is emitted.
//!
//! # Usage
//!
//! ```rust
//! use product_controller::observability::messages::validation::DuplicateStepName;
//! use product_controller::observability::messages::StructuredLog;
//!
//! DuplicateStepName { name: "ingest1" }.log();
//! ```

pub mod messages;
