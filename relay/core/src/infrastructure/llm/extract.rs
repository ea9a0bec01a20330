// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Reply Extraction
//
// Pure functions that pull a flat reply string out of upstream response
// envelopes. None of them fail: shapes they do not recognise degrade to a
// fallback string.

use serde_json::Value;

/// Depth-first search for the first usable `text` string field.
///
/// An object that carries a string `text` answers with it and is not
/// searched further. Empty answers count as "not found", so the search moves
/// on to the next sibling.
pub fn find_text(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                return Some(text);
            }
            map.values().filter_map(find_text).find(|t| !t.is_empty())
        }
        Value::Array(items) => items.iter().filter_map(find_text).find(|t| !t.is_empty()),
        _ => None,
    }
}

/// Gemini generate-content envelope.
///
/// Tolerates the candidate shapes seen across API versions, then falls back
/// to [`find_text`] over the whole body.
pub fn extract_gemini_text(raw: &Value) -> String {
    let map = match raw {
        Value::Object(map) => map,
        Value::String(s) => return s.clone(),
        other => return other.to_string(),
    };

    let first_candidate = map
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first());

    if let Some(Value::Object(candidate)) = first_candidate {
        if let Some(content) = candidate.get("content").and_then(Value::as_array) {
            if let Some(text) = content
                .iter()
                .find_map(|entry| entry.get("text").and_then(Value::as_str))
            {
                return text.to_string();
            }
        }
        if let Some(text) = candidate.get("text").and_then(Value::as_str) {
            return text.to_string();
        }
    }

    find_text(raw).unwrap_or_default().to_string()
}

/// OpenAI-style chat-completions envelope.
///
/// Strict: reads `choices[0].message.content` and otherwise returns the
/// compact JSON rendering of the whole body.
pub fn extract_openai_text(raw: &Value) -> String {
    raw.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| raw.to_string())
}
