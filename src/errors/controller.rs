// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{ConfigError, GraphError};

/// Hard failures of a controller operation.
///
/// Engine connectivity problems are not represented here; they are reported
/// as [`crate::traits::EngineReply::Unreachable`] values.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("unknown product '{name}'")]
    UnknownProduct { name: String },

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("failed to encode workflow submission: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to build engine client: {0}")]
    Client(#[from] reqwest::Error),
}
