// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Chat
//!
//! Per-request chat types: what the caller sent, how its history is
//! normalized, and what the relay answers with.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Request/response shaping shared by every provider adapter

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// System instruction used when the caller does not send one
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a friendly assistant named JK AI.";

/// Role assigned to history entries that do not name one
pub const DEFAULT_ROLE: &str = "user";

/// Upstream provider selected per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenRouter,
}

impl ProviderKind {
    /// Map the wire `provider` field. Anything other than `"openrouter"`
    /// (including an absent field) selects Gemini.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("openrouter") => Self::OpenRouter,
            _ => Self::Gemini,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenRouter => "openrouter",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One caller-supplied history entry, as loosely as it arrived
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryItem {
    /// A `{role, text}` object; either field may be missing
    Structured {
        role: Option<String>,
        text: Option<String>,
    },
    /// Anything that was not an object, coerced to its string form
    Raw { text: Option<String> },
}

impl HistoryItem {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::Structured {
                role: map.get("role").and_then(Value::as_str).map(str::to_owned),
                text: map.get("text").and_then(Value::as_str).map(str::to_owned),
            },
            Value::String(s) => Self::Raw {
                text: Some(s.clone()),
            },
            other => Self::Raw {
                text: Some(other.to_string()),
            },
        }
    }

    /// Normalize into a [`Turn`]. Entries without text are dropped.
    pub fn to_turn(&self) -> Option<Turn> {
        let (role, text) = match self {
            Self::Structured { role, text } => (role.as_deref(), text.as_deref()),
            Self::Raw { text } => (None, text.as_deref()),
        };

        match text {
            Some(text) if !text.is_empty() => Some(Turn {
                role: role.unwrap_or(DEFAULT_ROLE).to_string(),
                text: text.to_string(),
            }),
            _ => None,
        }
    }
}

/// A normalized conversational turn, ready to be translated into a
/// provider payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: String,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: DEFAULT_ROLE.to_string(),
            text: text.into(),
        }
    }
}

/// Inbound chat request after wire decoding
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Current user message; may be empty
    pub message: String,

    /// Prior turns, resent in full by the caller on every request
    pub history: Vec<HistoryItem>,

    pub system_instruction: String,

    pub provider: ProviderKind,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            provider: ProviderKind::default(),
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryItem>) -> Self {
        self.history = history;
        self
    }

    pub fn with_system_instruction(mut self, system_instruction: impl Into<String>) -> Self {
        self.system_instruction = system_instruction.into();
        self
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    /// Full conversation in order: usable history turns followed by the
    /// current message under role "user", even when that message is empty.
    pub fn conversation(&self) -> Vec<Turn> {
        let mut turns: Vec<Turn> = self.history.iter().filter_map(HistoryItem::to_turn).collect();
        turns.push(Turn::user(self.message.clone()));
        turns
    }
}

/// Successful relay answer
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    /// Extracted reply text; empty when nothing could be extracted
    pub reply: String,

    /// Verbatim upstream JSON body
    pub raw: Value,
}
