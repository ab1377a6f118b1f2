// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use product_controller::config::consts::DEFAULT_WORKER_COUNT;
use product_controller::config::load_and_validate_config;
use product_controller::controller::{ControllerRegistry, ProductState, StartOptions};

/// Manage per-product processing graphs on a workflow engine.
#[derive(Parser, Debug)]
#[command(name = "product-controller", version)]
struct Cli {
    /// Path to the YAML configuration file
    config: PathBuf,

    /// Log at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log at debug level
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    debug: bool,

    /// Log errors only
    #[arg(short, long, global = true, conflicts_with_all = ["verbose", "debug"])]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile and submit a product's workflow
    Start {
        product: String,
        #[arg(short, long, default_value_t = DEFAULT_WORKER_COUNT)]
        workers: u32,
        /// Ask the engine to validate without creating anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Terminate every workflow in a product's namespace
    Stop { product: String },
    /// Show the engine's workflow listing for a product
    Status { product: String },
    /// Print the compiled workflow as YAML without submitting it
    Render {
        product: String,
        #[arg(short, long, default_value_t = DEFAULT_WORKER_COUNT)]
        workers: u32,
    },
    /// List configured products and which of them are running
    Products,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    product: &'a str,
    state: ProductState,
    reply: product_controller::traits::EngineReply,
}

#[derive(Serialize)]
struct ProductsReport<'a> {
    configured: Vec<&'a str>,
    active: Vec<String>,
}

fn init_tracing(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    // RUST_LOG wins over the flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = load_and_validate_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let registry = ControllerRegistry::from_config(config)?;

    match &cli.command {
        Command::Start {
            product,
            workers,
            dry_run,
        } => {
            let outcome = registry
                .start(
                    product,
                    StartOptions {
                        worker_count: *workers,
                        dry_run: *dry_run,
                    },
                )
                .await?;
            print_json(&outcome)
        }
        Command::Stop { product } => print_json(&registry.stop(product).await?),
        Command::Status { product } => {
            let reply = registry.status(product).await?;
            print_json(&StatusReport {
                product,
                state: ProductState::from_reply(&reply),
                reply,
            })
        }
        Command::Render { product, workers } => {
            let document = registry.get(product)?.compile(*workers)?;
            print!("{}", serde_yaml::to_string(&document)?);
            Ok(())
        }
        Command::Products => print_json(&ProductsReport {
            configured: registry.product_names(),
            active: registry.active_products().await,
        }),
    }
}
