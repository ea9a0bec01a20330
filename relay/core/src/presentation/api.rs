// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::application::chat_service::ChatService;
use crate::domain::chat::{
    ChatReply, ChatRequest, HistoryItem, ProviderKind, DEFAULT_SYSTEM_INSTRUCTION,
};
use crate::domain::llm::RelayError;

pub struct AppState {
    pub chat_service: Arc<dyn ChatService>,
    pub start_time: Instant,
}

pub fn app(service: Arc<dyn ChatService>, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();
    let state = Arc::new(AppState {
        chat_service: service,
        start_time: Instant::now(),
    });

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .route_service("/", ServeFile::new(static_dir.join("welcomepage.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire shape of `POST /api/chat`. Every field is optional and loosely
/// typed; normalization into [`ChatRequest`] never fails.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequestBody {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub history: Option<Value>,
    #[serde(default)]
    pub system: Option<Value>,
    #[serde(default)]
    pub provider: Option<Value>,
    /// Sent by the browser client; not used by the relay
    #[serde(default)]
    pub lang: Option<Value>,
}

fn coerce_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl From<ChatRequestBody> for ChatRequest {
    fn from(body: ChatRequestBody) -> Self {
        let provider = ProviderKind::from_wire(body.provider.as_ref().and_then(Value::as_str));
        // Anything other than an array counts as no history
        let history = match body.history {
            Some(Value::Array(items)) => items.iter().map(HistoryItem::from_value).collect(),
            _ => Vec::new(),
        };

        ChatRequest::new(coerce_text(body.message).unwrap_or_default())
            .with_history(history)
            .with_system_instruction(
                coerce_text(body.system).unwrap_or_else(|| DEFAULT_SYSTEM_INSTRUCTION.to_string()),
            )
            .with_provider(provider)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            status: self.upstream_status(),
            body: self.upstream_body(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequestBody>,
) -> Result<Json<ChatReply>, RelayError> {
    let reply = state.chat_service.chat(payload.into()).await?;
    Ok(Json(reply))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::Turn;

    fn body(value: Value) -> ChatRequestBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_body_uses_defaults() {
        let request: ChatRequest = body(json!({})).into();
        assert_eq!(request.message, "");
        assert!(request.history.is_empty());
        assert_eq!(request.system_instruction, DEFAULT_SYSTEM_INSTRUCTION);
        assert_eq!(request.provider, ProviderKind::Gemini);
    }

    #[test]
    fn test_full_body() {
        let request: ChatRequest = body(json!({
            "message": "hi",
            "history": [{"role": "user", "text": "before"}, "raw"],
            "system": "Be terse.",
            "provider": "openrouter",
            "lang": "en"
        }))
        .into();

        assert_eq!(request.message, "hi");
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.system_instruction, "Be terse.");
        assert_eq!(request.provider, ProviderKind::OpenRouter);
    }

    #[test]
    fn test_loose_values_are_coerced() {
        let request: ChatRequest = body(json!({
            "message": 42,
            "system": null,
            "provider": 1,
            "history": null
        }))
        .into();

        assert_eq!(request.message, "42");
        assert_eq!(request.system_instruction, DEFAULT_SYSTEM_INSTRUCTION);
        assert_eq!(request.provider, ProviderKind::Gemini);
        assert!(request.history.is_empty());

        let explicit_empty: ChatRequest = body(json!({"system": ""})).into();
        assert_eq!(explicit_empty.system_instruction, "");

        let odd_lang: ChatRequest = body(json!({"message": "hi", "lang": 1})).into();
        assert_eq!(odd_lang.message, "hi");

        let object_history: ChatRequest =
            body(json!({"message": "hi", "history": {"role": "user", "text": "x"}})).into();
        assert!(object_history.history.is_empty());
        assert_eq!(object_history.conversation(), vec![Turn::user("hi")]);

        let unknown: ChatRequest = body(json!({"message": "hi", "unknown": 1})).into();
        assert_eq!(unknown.message, "hi");
    }
}
