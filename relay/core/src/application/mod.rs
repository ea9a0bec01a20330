// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod chat_service;

pub use chat_service::{ChatService, StandardChatService};
