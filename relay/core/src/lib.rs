// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! JK AI chat relay core
//!
//! Accepts a chat message plus caller-held history, forwards it to one of
//! two upstream LLM providers, and returns the extracted reply next to the
//! raw upstream body.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Wires the domain, application, infrastructure and
//!   presentation layers of the relay

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
