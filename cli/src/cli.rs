// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command-line surface of the `jkchat` binary

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use jkchat_core::domain::relay_config::RelayConfig;

use crate::commands::ConfigCommand;

/// JK AI chat relay - forwards chat turns to Gemini or OpenRouter
#[derive(Debug, Clone, Parser)]
#[command(name = "jkchat")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (overrides discovery, must exist).
    /// JKCHAT_CONFIG_PATH is honored by discovery when the file exists.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// HTTP listen port (overrides the config file and PORT)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// HTTP bind address (overrides the config file)
    #[arg(long, global = true, env = "JKCHAT_HOST")]
    pub host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "JKCHAT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the HTTP relay (default)
    #[command(name = "serve")]
    Serve,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

impl Cli {
    /// Effective configuration: file (or defaults), environment, then flags
    pub fn relay_config(&self) -> Result<RelayConfig> {
        let mut config = RelayConfig::load_or_default(self.config.clone())
            .context("Failed to load configuration")?;
        self.apply_flags(&mut config);
        Ok(config)
    }

    pub fn apply_flags(&self, config: &mut RelayConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_config_path_and_port_env_left_to_config_loading() {
        let command = Cli::command();
        for id in ["config", "port"] {
            let arg = command
                .get_arguments()
                .find(|a| a.get_id() == id)
                .unwrap();
            assert!(arg.get_env().is_none(), "--{} must not read the environment", id);
        }

        let mut config = RelayConfig::default();
        config.apply_overrides_from(|name| (name == "PORT").then(|| "abc".to_string()));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["jkchat", "--port", "6060", "--host", "0.0.0.0"]).unwrap();
        assert!(cli.command.is_none());

        let mut config = RelayConfig::default();
        cli.apply_flags(&mut config);
        assert_eq!(config.server.port, 6060);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_config_subcommand_parses() {
        let cli = Cli::try_parse_from(["jkchat", "config", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommand::Validate { file: None }
            })
        ));
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.yaml");
        std::fs::write(&path, "server:\n  port: 8181\n  static_dir: /srv/jk\n").unwrap();

        let cli = Cli::try_parse_from([
            "jkchat",
            "--config",
            path.to_str().unwrap(),
            "--host",
            "10.0.0.1",
        ])
        .unwrap();

        let mut config = RelayConfig::from_yaml_file(&path).unwrap();
        cli.apply_flags(&mut config);
        assert_eq!(config.server.port, 8181);
        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.static_dir, PathBuf::from("/srv/jk"));
    }
}
