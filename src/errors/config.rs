// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while loading configuration or resolving it into steps.

use std::path::PathBuf;

/// Configuration problems. These are fatal at startup or on first use and are
/// always surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("component '{component}' is not configured")]
    MissingComponent { component: String },

    #[error("invalid engine url '{url}': {reason}")]
    InvalidEngineUrl { url: String, reason: String },

    #[error("no products configured")]
    NoProducts,

    #[error("product '{product}' has an empty namespace")]
    EmptyNamespace { product: String },

    #[error(
        "worker count {worker_count} needs {required} multicast groups, only {available} available"
    )]
    MulticastExhausted {
        worker_count: u32,
        required: u32,
        available: u32,
    },
}
