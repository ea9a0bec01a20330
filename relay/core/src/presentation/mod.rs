// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer (`jkchat-core`)
//!
//! HTTP surface that translates external requests into application service
//! calls. Provider logic lives in `crate::infrastructure::llm`; this layer
//! only decodes the wire body and maps `RelayError` onto a JSON 500.
//!
//! | Route | Method | Description |
//! |-------|--------|-------------|
//! | `/api/chat` | POST | Relay one chat turn to Gemini or OpenRouter |
//! | `/` | GET | Welcome page from the static directory |
//! | `/static/*` | GET | Static assets |
//! | `/health` | GET | Liveness and uptime |

pub mod api;
