// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Relay Configuration Types
//
// Defines the configuration schema for the chat relay:
// - HTTP listener and static asset location
// - Gemini endpoint, model and API key
// - OpenRouter endpoint, model, API key and attribution headers
//
// API keys are never compiled in. They are read from the YAML file or,
// through the "env:VAR_NAME" indirection, from the environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level relay configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub openrouter: OpenRouterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding welcomepage.html and other static assets
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API root, without the `/models/...` suffix
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Model name placed in the generate-content path
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API key (supports "env:VAR_NAME" for environment variables)
    #[serde(default = "default_gemini_api_key")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    /// API root, without the `/chat/completions` suffix
    #[serde(default = "default_openrouter_base_url")]
    pub base_url: String,

    /// Model identifier sent in the payload (e.g., "openai/gpt-4o")
    #[serde(default = "default_openrouter_model")]
    pub model: String,

    /// API key (supports "env:VAR_NAME" for environment variables)
    #[serde(default = "default_openrouter_api_key")]
    pub api_key: Option<String>,

    /// Sent as `HTTP-Referer`
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Sent as `X-Title`
    #[serde(default = "default_site_name")]
    pub site_name: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_api_key() -> Option<String> {
    Some("env:GEMINI_API_KEY".to_string())
}

fn default_openrouter_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_openrouter_model() -> String {
    "openai/gpt-4o".to_string()
}

fn default_openrouter_api_key() -> Option<String> {
    Some("env:OPENROUTER_API_KEY".to_string())
}

fn default_site_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_site_name() -> String {
    "JK AI".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            api_key: default_gemini_api_key(),
        }
    }
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: default_openrouter_base_url(),
            model: default_openrouter_model(),
            api_key: default_openrouter_api_key(),
            site_url: default_site_url(),
            site_name: default_site_name(),
        }
    }
}

/// Resolve an API key setting against a variable lookup.
///
/// `"env:NAME"` reads `NAME`; anything else is taken literally. Unset and
/// empty values both mean "no key".
pub fn resolve_api_key_with<F>(key: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let resolved = match key {
        Some(k) => match k.strip_prefix("env:") {
            Some(var_name) => lookup(var_name),
            None => Some(k.to_string()),
        },
        None => None,
    };
    resolved.filter(|k| !k.is_empty())
}

/// Resolve an API key setting against the process environment
pub fn resolve_api_key(key: Option<&str>) -> Option<String> {
    resolve_api_key_with(key, |name| std::env::var(name).ok())
}

impl RelayConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Discover configuration file using precedence order
    /// 1. JKCHAT_CONFIG_PATH environment variable
    /// 2. ./jkchat-config.yaml (working directory)
    /// 3. ~/.jkchat/config.yaml (user home)
    /// 4. /etc/jkchat/config.yaml (Unix only)
    pub fn discover_config() -> Option<PathBuf> {
        Self::discover_config_with(|name| std::env::var(name).ok())
    }

    /// Discovery with an arbitrary variable lookup. A JKCHAT_CONFIG_PATH
    /// that points at a missing file is skipped.
    pub fn discover_config_with<F>(lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("JKCHAT_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            tracing::warn!("JKCHAT_CONFIG_PATH {:?} does not exist, ignoring", path);
        }

        let cwd = PathBuf::from("./jkchat-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".jkchat").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        {
            let system_config = PathBuf::from("/etc/jkchat/config.yaml");
            if system_config.exists() {
                return Some(system_config);
            }
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        let mut config = match Self::discover_config() {
            Some(config_path) => {
                tracing::info!("Loading configuration from discovered path: {:?}", config_path);
                Self::from_yaml_file(config_path)?
            }
            None => {
                tracing::info!("No configuration file found, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("GEMINI_API_KEY") {
            self.gemini.api_key = Some(val);
        }
        if let Some(val) = lookup("GEMINI_MODEL") {
            tracing::info!("Environment override: GEMINI_MODEL={}", val);
            self.gemini.model = val;
        }
        if let Some(val) = lookup("GEMINI_BASE_URL") {
            tracing::info!("Environment override: GEMINI_BASE_URL={}", val);
            self.gemini.base_url = val;
        }
        if let Some(val) = lookup("OPENROUTER_API_KEY") {
            self.openrouter.api_key = Some(val);
        }
        if let Some(val) = lookup("OPENROUTER_MODEL") {
            tracing::info!("Environment override: OPENROUTER_MODEL={}", val);
            self.openrouter.model = val;
        }
        if let Some(val) = lookup("OPENROUTER_BASE_URL") {
            tracing::info!("Environment override: OPENROUTER_BASE_URL={}", val);
            self.openrouter.base_url = val;
        }
        if let Some(val) = lookup("OPENROUTER_SITE_URL") {
            self.openrouter.site_url = val;
        }
        if let Some(val) = lookup("OPENROUTER_SITE_NAME") {
            self.openrouter.site_name = val;
        }
        if let Some(val) = lookup("PORT") {
            match val.parse::<u16>() {
                Ok(port) => {
                    tracing::info!("Environment override: PORT={}", port);
                    self.server.port = port;
                }
                Err(_) => {
                    tracing::warn!("Invalid value for PORT: '{}'. Ignoring.", val);
                }
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.gemini.base_url.is_empty() {
            anyhow::bail!("gemini.base_url cannot be empty");
        }
        if self.gemini.model.is_empty() {
            anyhow::bail!("gemini.model cannot be empty");
        }
        if self.openrouter.base_url.is_empty() {
            anyhow::bail!("openrouter.base_url cannot be empty");
        }
        if self.openrouter.model.is_empty() {
            anyhow::bail!("openrouter.model cannot be empty");
        }
        Ok(())
    }

    /// Copy with literal API keys masked; `env:` references are kept
    pub fn redacted(&self) -> Self {
        fn mask(key: &Option<String>) -> Option<String> {
            key.as_ref().map(|k| {
                if k.starts_with("env:") {
                    k.clone()
                } else {
                    "********".to_string()
                }
            })
        }

        let mut copy = self.clone();
        copy.gemini.api_key = mask(&self.gemini.api_key);
        copy.openrouter.api_key = mask(&self.openrouter.api_key);
        copy
    }
}
