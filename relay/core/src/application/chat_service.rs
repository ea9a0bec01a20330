// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::chat::{ChatReply, ChatRequest};
use crate::domain::llm::RelayError;
use crate::infrastructure::llm::ProviderRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Relay one chat request to its provider. One call in, at most one
    /// upstream call out; nothing is retried.
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply, RelayError>;
}

pub struct StandardChatService {
    registry: Arc<ProviderRegistry>,
}

impl StandardChatService {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl ChatService for StandardChatService {
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply, RelayError> {
        info!(
            "Relaying chat request: provider={} history={}",
            request.provider,
            request.history.len()
        );

        let provider = self.registry.resolve(request.provider)?;

        match provider.send(&request).await {
            Ok(reply) => {
                info!(
                    "Chat reply from {}: {} chars",
                    request.provider,
                    reply.reply.chars().count()
                );
                Ok(reply)
            }
            Err(e) => {
                match &e {
                    RelayError::Configuration(_) | RelayError::UpstreamHttp { .. } => {
                        warn!("Chat request failed: {}", e)
                    }
                    RelayError::Transport(_) | RelayError::InvalidResponse { .. } => {
                        error!("Chat request failed: {}", e)
                    }
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::ProviderKind;
    use crate::domain::llm::ChatProvider;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct RecordingProvider {
        kind: ProviderKind,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatProvider for RecordingProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        fn extract_reply(&self, raw: &Value) -> String {
            raw["echo"].as_str().unwrap_or_default().to_string()
        }

        async fn send(&self, request: &ChatRequest) -> Result<ChatReply, RelayError> {
            self.seen.lock().unwrap().push(request.message.clone());
            let raw = json!({"echo": format!("{}:{}", self.kind, request.message)});
            Ok(ChatReply {
                reply: self.extract_reply(&raw),
                raw,
            })
        }
    }

    fn recording(kind: ProviderKind) -> Arc<RecordingProvider> {
        Arc::new(RecordingProvider {
            kind,
            seen: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_dispatches_by_provider() {
        let gemini = recording(ProviderKind::Gemini);
        let openrouter = recording(ProviderKind::OpenRouter);
        let registry = ProviderRegistry::new()
            .with_provider(gemini.clone())
            .with_provider(openrouter.clone());
        let service = StandardChatService::new(Arc::new(registry));

        let reply = service.chat(ChatRequest::new("a")).await.unwrap();
        assert_eq!(reply.reply, "gemini:a");

        let reply = service
            .chat(ChatRequest::new("b").with_provider(ProviderKind::OpenRouter))
            .await
            .unwrap();
        assert_eq!(reply.reply, "openrouter:b");

        assert_eq!(*gemini.seen.lock().unwrap(), vec!["a".to_string()]);
        assert_eq!(*openrouter.seen.lock().unwrap(), vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_provider_surfaces_error() {
        let service = StandardChatService::new(Arc::new(ProviderRegistry::new()));
        let err = service.chat(ChatRequest::new("a")).await.unwrap_err();
        assert!(matches!(err, RelayError::Configuration(_)));
    }
}
