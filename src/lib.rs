// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // workflow engine clients
pub mod config;     // static config loading + validation
pub mod controller; // per-product lifecycle + registry
pub mod errors;     // error handling
pub mod observability;
pub mod traits;     // engine abstraction
pub mod workflow;   // step catalog, validation, graph compiler
