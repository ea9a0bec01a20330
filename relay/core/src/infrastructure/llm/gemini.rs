// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Gemini LLM Provider Adapter
//
// Anti-Corruption Layer for the Gemini generate-content API

use crate::domain::chat::{ChatReply, ChatRequest, ProviderKind};
use crate::domain::llm::{ChatProvider, RelayError};
use crate::domain::relay_config::{resolve_api_key, GeminiConfig};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::extract::extract_gemini_text;
use super::upstream::{self, MAX_OUTPUT_TOKENS, TEMPERATURE};

pub struct GeminiAdapter {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl GeminiContent {
    fn new(role: Option<String>, text: String) -> Self {
        Self {
            role,
            parts: vec![GeminiPart { text }],
        }
    }
}

impl GeminiAdapter {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: upstream::build_client()?,
            endpoint: format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn from_config(config: &GeminiConfig) -> anyhow::Result<Self> {
        Self::new(
            &config.base_url,
            &config.model,
            resolve_api_key(config.api_key.as_deref()),
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub(crate) fn build_payload(request: &ChatRequest) -> GeminiRequest {
        let contents = request
            .conversation()
            .into_iter()
            .map(|turn| GeminiContent::new(Some(turn.role), turn.text))
            .collect();

        GeminiRequest {
            system_instruction: GeminiContent::new(None, request.system_instruction.clone()),
            contents,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[async_trait]
impl ChatProvider for GeminiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn extract_reply(&self, raw: &Value) -> String {
        extract_gemini_text(raw)
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, RelayError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            RelayError::Configuration("GEMINI_API_KEY not configured on server".to_string())
        })?;

        let payload = Self::build_payload(request);
        debug!("Calling Gemini: contents={}", payload.contents.len());

        let raw = upstream::post_json(
            self.kind(),
            self.client
                .post(&self.endpoint)
                .header("x-goog-api-key", api_key)
                .json(&payload),
        )
        .await?;

        Ok(ChatReply {
            reply: self.extract_reply(&raw),
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::HistoryItem;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let history = vec![
            HistoryItem::from_value(&json!({"role": "user", "text": "hi"})),
            HistoryItem::from_value(&json!({"role": "model"})),
            HistoryItem::from_value(&json!({"role": "model", "text": "hello"})),
        ];
        let request = ChatRequest::new("how are you?")
            .with_history(history)
            .with_system_instruction("Be brief.");

        let payload = serde_json::to_value(GeminiAdapter::build_payload(&request)).unwrap();

        assert_eq!(
            payload,
            json!({
                "system_instruction": {"parts": [{"text": "Be brief."}]},
                "contents": [
                    {"role": "user", "parts": [{"text": "hi"}]},
                    {"role": "model", "parts": [{"text": "hello"}]},
                    {"role": "user", "parts": [{"text": "how are you?"}]}
                ],
                "generationConfig": {"temperature": 0.2, "maxOutputTokens": 512}
            })
        );
    }

    #[test]
    fn test_payload_keeps_empty_message_and_instruction() {
        let request = ChatRequest::new("").with_system_instruction("");
        let payload = serde_json::to_value(GeminiAdapter::build_payload(&request)).unwrap();

        assert_eq!(payload["system_instruction"], json!({"parts": [{"text": ""}]}));
        assert_eq!(
            payload["contents"],
            json!([{"role": "user", "parts": [{"text": ""}]}])
        );
    }

    #[test]
    fn test_endpoint_includes_model() {
        let adapter =
            GeminiAdapter::new("https://example.test/v1beta/", "gemini-2.0-flash", None).unwrap();
        assert_eq!(
            adapter.endpoint,
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert!(!adapter.has_api_key());
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        // Unroutable endpoint: reaching the network would surface as Transport
        let adapter = GeminiAdapter::new("http://192.0.2.1:9", "m", Some(String::new())).unwrap();
        let err = adapter.send(&ChatRequest::new("hi")).await.unwrap_err();
        assert!(matches!(err, RelayError::Configuration(_)));
        assert_eq!(err.to_string(), "GEMINI_API_KEY not configured on server");
    }
}
