// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # JK AI Chat Relay
//!
//! The `jkchat` binary serves the chat relay.
//!
//! ## Commands
//!
//! - `jkchat` / `jkchat serve` - Run the HTTP relay in the foreground
//! - `jkchat config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::Parser;

use jkchat_relay::cli::{Cli, Commands};
use jkchat_relay::commands;

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed flags
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command.clone().unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle_command(&cli).await,
        Commands::Config { command } => {
            commands::config::handle_command(command, cli.config.clone()).await
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
