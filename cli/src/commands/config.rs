// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use jkchat_core::domain::relay_config::{resolve_api_key, RelayConfig};

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration (API keys redacted)
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path
        #[arg(short, long, default_value = "./jkchat-config.yaml")]
        output: PathBuf,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate { output } => generate(output).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = RelayConfig::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        match &config_override {
            Some(path) => println!("  1. --config flag: {}", path.display()),
            None => println!("  1. --config flag: {}", "(not set)".dimmed()),
        }
        println!("  2. JKCHAT_CONFIG_PATH (if the file exists)");
        println!("  3. ./jkchat-config.yaml");
        println!("  4. ~/.jkchat/config.yaml");
        println!("  5. /etc/jkchat/config.yaml");
        println!();
    }

    println!("{}", "Providers:".bold());
    println!(
        "  gemini      {} (key {})",
        config.gemini.model,
        key_status(config.gemini.api_key.as_deref())
    );
    println!(
        "  openrouter  {} (key {})",
        config.openrouter.model,
        key_status(config.openrouter.api_key.as_deref())
    );
    println!();

    println!("{}", "Effective configuration:".bold());
    print!("{}", config.redacted().to_yaml_string()?);

    Ok(())
}

fn key_status(key: Option<&str>) -> colored::ColoredString {
    if resolve_api_key(key).is_some() {
        "set".green()
    } else {
        "missing".yellow()
    }
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = RelayConfig::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

async fn generate(output: PathBuf) -> Result<()> {
    let sample = RelayConfig::default().to_yaml_string()?;

    std::fs::write(&output, sample)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}
