// ABOUTME: Plan generation orchestrator driving prompt, completion, extraction, retry, and fallback
// ABOUTME: Guarantees a shape-valid plan with provenance metadata for every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Generation Orchestrator
//!
//! One request moves through these steps:
//!
//! 1. **Credential check**: no credential means fallback with
//!    `missing_api_key` and no network call.
//! 2. **Attempt 1**: base prompt at the creative temperature.
//! 3. **Attempt 2**: only after any attempt-1 failure. Same prompt plus the
//!    strict JSON-only suffix, at the retry temperature.
//! 4. **Fallback**: the deterministic plan, tagged with the reason of the
//!    second failure and the best raw text seen.
//!
//! [`PlanGenerator::generate`] is total: it never returns an error.

use std::sync::Arc;
use std::time::Duration;

use pierre_plan_core::constants::generation;
use pierre_plan_core::models::{
    FailureReason, Plan, PlanMetadata, PlanResponse, PlanShapeError, Profile,
};
use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};

use super::extract::{extract, ParseFailure};
use super::{fallback, normalize, prompt};
use crate::config::LlmConfig;
use crate::llm::{CompletionClient, CompletionFailure, PromptPair};

/// Per-deployment generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Model identifier reported in metadata
    pub model: String,
    /// Attempt-1 temperature
    pub temperature: f32,
    /// Attempt-2 temperature
    pub retry_temperature: f32,
    /// Per-attempt deadline
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: generation::DEFAULT_MODEL.to_owned(),
            temperature: generation::FIRST_ATTEMPT_TEMPERATURE,
            retry_temperature: generation::RETRY_TEMPERATURE,
            timeout: Duration::from_millis(generation::DEFAULT_TIMEOUT_MS),
        }
    }
}

impl GenerationSettings {
    /// Derive settings from backend configuration
    #[must_use]
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            retry_temperature: config.retry_temperature,
            timeout: config.timeout(),
        }
    }
}

/// Why a single attempt produced no usable plan
#[derive(Debug)]
enum AttemptFailure {
    Completion(CompletionFailure),
    Parse(ParseFailure),
    Shape { raw: String, error: PlanShapeError },
}

impl AttemptFailure {
    fn reason(&self) -> FailureReason {
        match self {
            Self::Completion(CompletionFailure::AuthMissing) => FailureReason::MissingApiKey,
            Self::Completion(CompletionFailure::Backend { status, .. }) => {
                FailureReason::BackendError { status: *status }
            }
            Self::Completion(CompletionFailure::Transport(_)) => FailureReason::Exception,
            Self::Completion(CompletionFailure::Timeout { .. } | CompletionFailure::EmptyResponse)
            | Self::Parse(_)
            | Self::Shape { .. } => FailureReason::BadJsonOrTimeout,
        }
    }

    /// Raw backend text this attempt produced, if any
    fn into_raw(self) -> Option<String> {
        match self {
            Self::Completion(CompletionFailure::Backend { body, .. }) => Some(body),
            Self::Completion(_) => None,
            Self::Parse(failure) => Some(failure.raw),
            Self::Shape { raw, .. } => Some(raw),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Completion(failure) => failure.to_string(),
            Self::Parse(failure) => failure.to_string(),
            Self::Shape { error, .. } => error.to_string(),
        }
    }
}

/// Resilient plan generator
///
/// Built once at the composition root and shared read-only across requests.
pub struct PlanGenerator {
    client: Arc<dyn CompletionClient>,
    settings: GenerationSettings,
}

impl PlanGenerator {
    /// Create a generator around a completion client
    #[must_use]
    pub fn new(client: Arc<dyn CompletionClient>, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }

    /// Normalize raw caller data and generate a plan for it
    pub async fn generate_from_value(&self, raw: &Value) -> PlanResponse {
        self.generate(&normalize(raw)).await
    }

    /// Generate a plan for a normalized profile
    ///
    /// Always returns a shape-valid plan; degraded output is marked in `meta`.
    pub async fn generate(&self, profile: &Profile) -> PlanResponse {
        let meta = PlanMetadata::new(self.settings.model.as_str());
        let span = info_span!("plan_generation", request_id = %meta.request_id);
        self.run(profile, meta).instrument(span).await
    }

    async fn run(&self, profile: &Profile, mut meta: PlanMetadata) -> PlanResponse {
        if !self.client.is_configured() {
            warn!("No completion credential configured, serving fallback plan");
            return fallback::fallback(profile, meta, FailureReason::MissingApiKey, None);
        }

        let base_prompt = prompt::build(profile);

        meta.attempts = 1;
        let first = match self
            .attempt(1, &base_prompt, self.settings.temperature)
            .await
        {
            Ok(plan) => return PlanResponse { plan, meta },
            Err(failure) => failure,
        };

        meta.retry = true;
        meta.attempts = 2;
        let second = match self
            .attempt(2, &base_prompt.with_strict_suffix(), self.settings.retry_temperature)
            .await
        {
            Ok(plan) => return PlanResponse { plan, meta },
            Err(failure) => failure,
        };

        let reason = second.reason();
        let raw = second.into_raw().or_else(|| first.into_raw());
        warn!(reason = %reason, "Both attempts failed, serving fallback plan");
        fallback::fallback(profile, meta, reason, raw)
    }

    async fn attempt(
        &self,
        number: u8,
        prompt: &PromptPair,
        temperature: f32,
    ) -> Result<Plan, AttemptFailure> {
        info!(attempt = number, temperature, "Requesting plan completion");

        let result = self
            .client
            .complete(prompt, temperature, self.settings.timeout)
            .await
            .map_err(AttemptFailure::Completion)
            .and_then(|text| {
                let value = extract(&text).map_err(AttemptFailure::Parse)?;
                Plan::from_value(value).map_err(|error| AttemptFailure::Shape { raw: text, error })
            });

        match &result {
            Ok(plan) => info!(attempt = number, days = plan.week.len(), "Plan accepted"),
            Err(failure) => warn!(
                attempt = number,
                reason = %failure.reason(),
                detail = %failure.describe(),
                "Plan attempt failed"
            ),
        }

        result
    }
}
