// ABOUTME: LLM completion abstraction used by the plan generation pipeline
// ABOUTME: Defines chat messages, prompt pairs, the CompletionClient seam, and its failure kinds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Completion Interface
//!
//! The pipeline talks to its generative backend only through the
//! [`CompletionClient`] trait. The production implementation is
//! [`HttpCompletionClient`], which speaks the chat completions wire format.
//! Tests substitute scripted implementations.
//!
//! ## Key Concepts
//!
//! - **`PromptPair`**: the system directive plus user content for one attempt
//! - **`CompletionClient`**: one bounded-deadline call returning raw text
//! - **`CompletionFailure`**: typed failure kinds the orchestrator maps to reasons
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use pierre_plan_server::config::LlmConfig;
//! use pierre_plan_server::llm::{CompletionClient, HttpCompletionClient, PromptPair};
//!
//! async fn example() {
//!     let client = HttpCompletionClient::new(LlmConfig::default()).unwrap();
//!     let prompt = PromptPair::new("You are a coach.", "Plan my week.");
//!     let text = client.complete(&prompt, 0.8, Duration::from_secs(9)).await;
//! }
//! ```

mod client;
pub mod envelope;
pub mod prompts;

pub use client::HttpCompletionClient;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
}

/// A single message in a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// System directive plus user content for a single completion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    /// Fixed behavioral directive
    pub system: String,
    /// Profile-specific content and output schema
    pub user: String,
}

impl PromptPair {
    /// Create a prompt pair
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    /// Copy of this prompt with an extra instruction appended to the user content
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            system: self.system.clone(),
            user: format!("{}\n\n{suffix}", self.user),
        }
    }

    /// Copy of this prompt with the strict JSON-only instruction appended
    #[must_use]
    pub fn with_strict_suffix(&self) -> Self {
        self.with_suffix(prompts::STRICT_JSON_SUFFIX)
    }

    /// Messages in wire order: system first, then user
    #[must_use]
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system.as_str()),
            ChatMessage::user(self.user.as_str()),
        ]
    }
}

// ============================================================================
// Failures
// ============================================================================

/// Typed failure of a single completion call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionFailure {
    /// No credential configured; detected before any network call
    #[error("no API credential configured")]
    AuthMissing,
    /// Backend answered with a non-success status
    #[error("backend returned status {status}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Raw error body
        body: String,
    },
    /// Deadline elapsed and the request was cancelled
    #[error("completion timed out after {timeout_ms} ms")]
    Timeout {
        /// Deadline that elapsed
        timeout_ms: u64,
    },
    /// Success envelope carried no text at any known position
    #[error("backend returned no completion text")]
    EmptyResponse,
    /// Connection, body read, or envelope decode failure
    #[error("transport failure: {0}")]
    Transport(String),
}

// ============================================================================
// Client Trait
// ============================================================================

/// Collaborator issuing one completion request per call
///
/// Implementations must enforce `timeout` themselves and must not retry;
/// retry policy belongs to the caller.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Whether a credential is available; checked before any call is issued
    fn is_configured(&self) -> bool;

    /// Issue one completion request and return the raw completion text
    ///
    /// # Errors
    ///
    /// Returns a [`CompletionFailure`] describing why no text was obtained.
    async fn complete(
        &self,
        prompt: &PromptPair,
        temperature: f32,
        timeout: Duration,
    ) -> Result<String, CompletionFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_pair_suffix_keeps_system() {
        let base = PromptPair::new("sys", "user body");
        let strict = base.with_suffix("ONLY JSON");

        assert_eq!(strict.system, "sys");
        assert!(strict.user.starts_with("user body"));
        assert!(strict.user.ends_with("ONLY JSON"));
        assert_eq!(base.user, "user body");
    }

    #[test]
    fn test_messages_order_and_roles() {
        let messages = PromptPair::new("a", "b").to_messages();
        let json = serde_json::to_value(&messages).unwrap();

        assert_eq!(json[0]["role"], "system");
        assert_eq!(json[1]["role"], "user");
        assert_eq!(json[1]["content"], "b");
    }
}
