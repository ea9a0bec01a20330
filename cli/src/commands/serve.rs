// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `jkchat serve` - run the relay in the foreground

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::Cli;
use crate::server::start_server;

pub async fn handle_command(cli: &Cli) -> Result<()> {
    let config = cli.relay_config()?;
    config
        .validate()
        .context("Configuration validation failed")?;

    info!(
        "Starting JK AI chat relay on {}:{}",
        config.server.host, config.server.port
    );

    start_server(config).await
}
