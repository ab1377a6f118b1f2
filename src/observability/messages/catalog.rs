// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for step catalog sizing.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Catalog sized a product graph for a worker count.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct CatalogSized {
    pub worker_count: u32,
    pub ingest: u32,
    pub calibrator: u32,
    pub batch_stage: bool,
}

impl Display for CatalogSized {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Sized graph for {} workers: {} ingest, {} calibrator, batch_stage={}",
            self.worker_count, self.ingest, self.calibrator, self.batch_stage
        )
    }
}

impl StructuredLog for CatalogSized {
    fn log(&self) {
        tracing::debug!(
            worker_count = self.worker_count,
            ingest = self.ingest,
            calibrator = self.calibrator,
            batch_stage = self.batch_stage,
            "{}", self
        );
    }
}

/// Worker count needs more multicast groups than the address range holds.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct MulticastExhausted {
    pub worker_count: u32,
    pub required: u32,
    pub available: u32,
}

impl Display for MulticastExhausted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker count {} needs {} multicast groups, only {} available",
            self.worker_count, self.required, self.available
        )
    }
}

impl StructuredLog for MulticastExhausted {
    fn log(&self) {
        tracing::error!(
            worker_count = self.worker_count,
            required = self.required,
            available = self.available,
            "{}", self
        );
    }
}
