// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod controller;
mod graph;

pub use config::ConfigError;
pub use controller::ControllerError;
pub use graph::GraphError;
