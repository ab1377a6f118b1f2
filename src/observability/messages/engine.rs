// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for outbound workflow engine calls.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Request about to be sent to the engine.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct EngineRequestSent<'a> {
    pub method: &'a str,
    pub url: &'a str,
}

impl Display for EngineRequestSent<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

impl StructuredLog for EngineRequestSent<'_> {
    fn log(&self) {
        tracing::debug!(method = self.method, url = self.url, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "engine_request",
            span_name = name,
            method = self.method,
            url = self.url,
        )
    }
}

/// The engine could not be reached.
///
/// # Log Level
/// `warn!` - Recovered locally, reported to the caller as data
pub struct EngineUnreachable<'a> {
    pub method: &'a str,
    pub url: &'a str,
    pub reason: &'a str,
}

impl Display for EngineUnreachable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine unreachable for {} {}: {}",
            self.method, self.url, self.reason
        )
    }
}

impl StructuredLog for EngineUnreachable<'_> {
    fn log(&self) {
        tracing::warn!(
            method = self.method,
            url = self.url,
            reason = self.reason,
            "{}", self
        );
    }
}

/// The engine answered with a non-success status.
///
/// # Log Level
/// `warn!` - Relayed verbatim to the caller
pub struct EngineRejected<'a> {
    pub method: &'a str,
    pub url: &'a str,
    pub status: u16,
}

impl Display for EngineRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine rejected {} {} with status {}",
            self.method, self.url, self.status
        )
    }
}

impl StructuredLog for EngineRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            method = self.method,
            url = self.url,
            status = self.status,
            "{}", self
        );
    }
}
