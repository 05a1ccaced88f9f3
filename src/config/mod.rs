// ABOUTME: Configuration module for centralized server settings
// ABOUTME: Resolves HTTP, CORS, LLM backend, and failure policy settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Pierre Plan Server
//!
//! - **Environment**: `ServerConfig` resolved once from environment variables
//! - **Types**: small enums parsed from configuration strings

/// Environment and server configuration
pub mod environment;
/// Configuration value types
pub mod types;

pub use environment::{CorsConfig, LlmConfig, ServerConfig};
pub use types::{Environment, FailurePolicy};
