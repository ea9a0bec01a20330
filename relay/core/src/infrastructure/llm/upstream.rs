// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Upstream HTTP plumbing shared by the provider adapters.
//
// Classifies every outcome of one POST into the relay error taxonomy:
// transport failure, non-2xx answer, non-JSON answer, or a parsed body.

use crate::domain::chat::ProviderKind;
use crate::domain::llm::RelayError;
use anyhow::Context;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Fixed per-call timeout for upstream requests
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Completion limits sent to both providers
pub const TEMPERATURE: f64 = 0.2;
pub const MAX_OUTPUT_TOKENS: u32 = 512;

pub fn build_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .context("Failed to build upstream HTTP client")
}

/// Send a prepared request and return the parsed JSON body of a 2xx answer
pub async fn post_json(
    provider: ProviderKind,
    request: reqwest::RequestBuilder,
) -> Result<Value, RelayError> {
    let response = request.send().await.map_err(|e| {
        error!("{} request failed: {}", provider, e);
        RelayError::Transport(format!("{} request failed: {}", provider, e))
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("{} upstream returned HTTP {}", provider, status);
        return Err(RelayError::UpstreamHttp {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await.map_err(|e| {
        error!("Failed to read {} response body: {}", provider, e);
        RelayError::Transport(format!("{} request failed: {}", provider, e))
    })?;

    debug!("{} upstream answered HTTP {} ({} bytes)", provider, status, text.len());

    serde_json::from_str(&text).map_err(|e| RelayError::InvalidResponse {
        provider,
        message: e.to_string(),
    })
}
