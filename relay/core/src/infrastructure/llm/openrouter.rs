// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// OpenRouter LLM Provider Adapter
//
// Anti-Corruption Layer for OpenRouter's OpenAI-compatible
// chat-completions API

use crate::domain::chat::{ChatReply, ChatRequest, ProviderKind};
use crate::domain::llm::{ChatProvider, RelayError};
use crate::domain::relay_config::{resolve_api_key, OpenRouterConfig};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::extract::extract_openai_text;
use super::upstream::{self, MAX_OUTPUT_TOKENS, TEMPERATURE};

pub struct OpenRouterAdapter {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    site_url: String,
    site_name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenRouterRequest {
    model: String,
    messages: Vec<OpenRouterMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct OpenRouterMessage {
    role: String,
    content: String,
}

impl OpenRouterAdapter {
    pub fn from_config(config: &OpenRouterConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: upstream::build_client()?,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            // No local precondition: an unset key goes out empty and the
            // upstream's rejection is forwarded like any other HTTP error
            api_key: resolve_api_key(config.api_key.as_deref()).unwrap_or_default(),
            model: config.model.clone(),
            site_url: config.site_url.clone(),
            site_name: config.site_name.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub(crate) fn build_payload(&self, request: &ChatRequest) -> OpenRouterRequest {
        let mut messages = Vec::new();
        if !request.system_instruction.is_empty() {
            messages.push(OpenRouterMessage {
                role: "system".to_string(),
                content: request.system_instruction.clone(),
            });
        }
        messages.extend(request.conversation().into_iter().map(|turn| OpenRouterMessage {
            role: turn.role,
            content: turn.text,
        }));

        OpenRouterRequest {
            model: self.model.clone(),
            messages,
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenRouterAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenRouter
    }

    fn extract_reply(&self, raw: &Value) -> String {
        extract_openai_text(raw)
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, RelayError> {
        let payload = self.build_payload(request);
        debug!(
            "Calling OpenRouter: model={} messages={}",
            self.model,
            payload.messages.len()
        );

        let raw = upstream::post_json(
            self.kind(),
            self.client
                .post(&self.endpoint)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("HTTP-Referer", &self.site_url)
                .header("X-Title", &self.site_name)
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

    fn adapter() -> OpenRouterAdapter {
        let config = OpenRouterConfig {
            api_key: Some("test-key".to_string()),
            ..OpenRouterConfig::default()
        };
        OpenRouterAdapter::from_config(&config).unwrap()
    }

    #[test]
    fn test_payload_shape() {
        let history = vec![
            HistoryItem::from_value(&json!({"role": "user", "text": "hi"})),
            HistoryItem::from_value(&json!({"text": ""})),
            HistoryItem::from_value(&json!({"role": "assistant", "text": "hello"})),
        ];
        let request = ChatRequest::new("bye")
            .with_history(history)
            .with_system_instruction("Be brief.")
            .with_provider(ProviderKind::OpenRouter);

        let payload = serde_json::to_value(adapter().build_payload(&request)).unwrap();

        assert_eq!(
            payload,
            json!({
                "model": "openai/gpt-4o",
                "messages": [
                    {"role": "system", "content": "Be brief."},
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello"},
                    {"role": "user", "content": "bye"}
                ],
                "max_tokens": 512,
                "temperature": 0.2
            })
        );
    }

    #[test]
    fn test_empty_system_instruction_is_omitted() {
        let request = ChatRequest::new("").with_system_instruction("");
        let payload = serde_json::to_value(adapter().build_payload(&request)).unwrap();

        assert_eq!(payload["messages"], json!([{"role": "user", "content": ""}]));
    }

    #[test]
    fn test_endpoint_and_key() {
        let adapter = adapter();
        assert_eq!(adapter.endpoint, "https://openrouter.ai/api/v1/chat/completions");
        assert!(adapter.has_api_key());

        let keyless = OpenRouterAdapter::from_config(&OpenRouterConfig {
            api_key: None,
            ..OpenRouterConfig::default()
        })
        .unwrap();
        assert!(!keyless.has_api_key());
    }
}
