// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Request/response shaping, the provider interface and relay configuration.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Owns the types every other layer speaks in

pub mod chat;
pub mod llm;
pub mod relay_config;
