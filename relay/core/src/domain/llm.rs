// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Llm
//!
//! Provider interface and the relay error taxonomy.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Isolates the chat flow from vendor wire formats

// LLM Provider Domain Interface (Anti-Corruption Layer)
//
// Each upstream vendor gets one adapter in infrastructure/llm/ that
// translates a ChatRequest into its payload and pulls a flat reply string
// back out of its response envelope.

use async_trait::async_trait;
use serde_json::Value;

use super::chat::{ChatReply, ChatRequest, ProviderKind};

/// Domain interface for upstream chat providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Which provider this adapter speaks to
    fn kind(&self) -> ProviderKind;

    /// Locate the reply text inside a parsed upstream body. Never fails;
    /// unexpected shapes degrade to a fallback string.
    fn extract_reply(&self, raw: &Value) -> String;

    /// Issue one upstream call for the request
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, RelayError>;
}

/// Errors that can occur while relaying a chat request
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// A required secret or setting is missing; no network call was made
    #[error("{0}")]
    Configuration(String),

    /// Upstream answered with a non-2xx status
    #[error("{provider} upstream returned HTTP {status}")]
    UpstreamHttp {
        provider: ProviderKind,
        status: u16,
        body: String,
    },

    /// Timeout, DNS or connection failure
    #[error("{0}")]
    Transport(String),

    /// Upstream answered 2xx with a body that is not JSON
    #[error("Failed to parse {provider} response: {message}")]
    InvalidResponse {
        provider: ProviderKind,
        message: String,
    },
}

impl RelayError {
    /// Upstream status code, when the upstream answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UpstreamHttp { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw upstream body text, when the upstream answered at all
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::UpstreamHttp { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_upstream_errors_carry_status_and_body() {
        let upstream = RelayError::UpstreamHttp {
            provider: ProviderKind::Gemini,
            status: 429,
            body: "{\"error\":\"slow down\"}".to_string(),
        };
        assert_eq!(upstream.upstream_status(), Some(429));
        assert_eq!(upstream.upstream_body(), Some("{\"error\":\"slow down\"}"));
        assert_eq!(upstream.to_string(), "gemini upstream returned HTTP 429");

        let config = RelayError::Configuration("GEMINI_API_KEY not configured on server".into());
        assert_eq!(config.upstream_status(), None);
        assert_eq!(config.upstream_body(), None);
        assert_eq!(config.to_string(), "GEMINI_API_KEY not configured on server");

        let transport = RelayError::Transport("connection refused".into());
        assert_eq!(transport.upstream_status(), None);
        assert_eq!(transport.upstream_body(), None);
    }
}
