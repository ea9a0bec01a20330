// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! JK AI chat relay CLI library - exposes testable components
//!
//! # Architecture
//!
//! - **Layer:** Interface / Presentation Layer
//! - **Purpose:** Flag parsing, configuration assembly and server lifecycle

pub mod cli;
pub mod commands;
pub mod server;
