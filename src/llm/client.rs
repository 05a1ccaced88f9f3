// ABOUTME: HTTP completion client for OpenAI-compatible chat completion endpoints
// ABOUTME: Sends one bearer-authenticated request per call under a cancelling deadline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use pierre_plan_core::errors::AppError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::{envelope, ChatMessage, CompletionClient, CompletionFailure, PromptPair};
use crate::config::LlmConfig;

/// Connection establishment bound; the per-call deadline covers the rest
const CONNECT_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Chat completions client backed by a shared `reqwest` connection pool
pub struct HttpCompletionClient {
    client: Client,
    config: LlmConfig,
}

impl HttpCompletionClient {
    /// Create a client with its own connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: LlmConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Log-friendly summary of a backend error body
    fn describe_error(status: u16, body: &str) -> String {
        serde_json::from_str::<ApiErrorResponse>(body).map_or_else(
            |_| {
                format!(
                    "API error ({status}): {}",
                    body.chars().take(200).collect::<String>()
                )
            },
            |parsed| {
                format!(
                    "{} ({status}): {}",
                    parsed.error.error_type.as_deref().unwrap_or("unknown"),
                    parsed.error.message
                )
            },
        )
    }

    fn transport(e: &reqwest::Error, timeout_ms: u64) -> CompletionFailure {
        if e.is_timeout() {
            CompletionFailure::Timeout { timeout_ms }
        } else {
            CompletionFailure::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn complete(
        &self,
        prompt: &PromptPair,
        temperature: f32,
        timeout: Duration,
    ) -> Result<String, CompletionFailure> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(CompletionFailure::AuthMissing);
        };
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

        let request = CompletionRequest {
            model: &self.config.model,
            messages: prompt.to_messages(),
            temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(
            user_chars = prompt.user.len(),
            max_tokens = self.config.max_tokens,
            "Sending completion request"
        );

        // Send and body read share one deadline; dropping the future cancels the request
        let call = async {
            let response = self
                .client
                .post(self.endpoint())
                .bearer_auth(api_key)
                .json(&request)
                .send()
                .await
                .map_err(|e| Self::transport(&e, timeout_ms))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| Self::transport(&e, timeout_ms))?;
            Ok::<_, CompletionFailure>((status, body))
        };

        let (status, body) = tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| {
                warn!(timeout_ms, "Completion request timed out");
                CompletionFailure::Timeout { timeout_ms }
            })??;

        if !status.is_success() {
            error!("{}", Self::describe_error(status.as_u16(), &body));
            return Err(CompletionFailure::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Value = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to decode completion envelope: {}", e);
            CompletionFailure::Transport(format!("undecodable response envelope: {e}"))
        })?;

        envelope::extract_text(&envelope).ok_or(CompletionFailure::EmptyResponse)
    }
}
