// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `catalog` - Step catalog sizing
//! * `compiler` - Graph compilation
//! * `validation` - Step graph defects
//! * `engine` - Outbound engine calls
//! * `controller` - Product lifecycle operations

use tracing::Span;

pub mod catalog;
pub mod compiler;
pub mod controller;
pub mod engine;
pub mod validation;

/// A log event that knows its level and structured fields.
pub trait StructuredLog {
    /// Emit the event at its level with its fields attached.
    fn log(&self);

    /// A span carrying the same fields, for wrapping the work the event
    /// describes.
    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("event", span_name = name)
    }
}
