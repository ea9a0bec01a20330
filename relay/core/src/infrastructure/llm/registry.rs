// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// LLM Provider Registry
//
// Builds one adapter per provider from configuration and hands out the
// adapter matching a request's ProviderKind. Dispatch on the provider name
// happens here and nowhere else.

use crate::domain::chat::ProviderKind;
use crate::domain::llm::{ChatProvider, RelayError};
use crate::domain::relay_config::RelayConfig;
use anyhow::Context;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::gemini::GeminiAdapter;
use super::openrouter::OpenRouterAdapter;

/// Registry for the upstream chat providers
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn ChatProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create provider registry from relay configuration
    pub fn from_config(config: &RelayConfig) -> anyhow::Result<Self> {
        info!("Initializing LLM provider registry");

        let gemini = GeminiAdapter::from_config(&config.gemini)
            .context("Failed to initialize Gemini provider")?;
        info!(
            "Provider gemini: model={} endpoint={}",
            config.gemini.model, config.gemini.base_url
        );
        if !gemini.has_api_key() {
            warn!("GEMINI_API_KEY is not set - gemini requests will be rejected");
        }

        let openrouter = OpenRouterAdapter::from_config(&config.openrouter)
            .context("Failed to initialize OpenRouter provider")?;
        info!(
            "Provider openrouter: model={} endpoint={}",
            config.openrouter.model, config.openrouter.base_url
        );
        if !openrouter.has_api_key() {
            warn!("OPENROUTER_API_KEY is not set - openrouter requests will be sent unauthenticated");
        }

        Ok(Self::new()
            .with_provider(Arc::new(gemini))
            .with_provider(Arc::new(openrouter)))
    }

    /// Register (or replace) the adapter for its provider kind
    pub fn with_provider(mut self, provider: Arc<dyn ChatProvider>) -> Self {
        self.providers.insert(provider.kind(), provider);
        self
    }

    /// Adapter for a provider kind
    pub fn resolve(&self, kind: ProviderKind) -> Result<Arc<dyn ChatProvider>, RelayError> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or_else(|| RelayError::Configuration(format!("Provider '{}' not configured", kind)))
    }

    pub fn available_providers(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<ProviderKind> = self.providers.keys().copied().collect();
        kinds.sort_by_key(|k| k.as_str());
        kinds
    }
}
