// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// LLM Provider Infrastructure - Anti-Corruption Layer Implementations
//
// Each provider adapter translates between the domain chat types and one
// external API. Both share the upstream transport and expose their reply
// extraction through ChatProvider::extract_reply.

pub mod extract;
pub mod gemini;
pub mod openrouter;
pub mod registry;
pub mod upstream;

pub use registry::ProviderRegistry;
