// ABOUTME: Diagnostic metadata attached to every generated plan response
// ABOUTME: Records model identity, retry and fallback flags, and failure reasons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::Plan;

/// Why a response carries degraded (fallback) content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// No backend credential configured; no network call was made
    MissingApiKey,
    /// Model output was unparseable or off-schema, the call timed out, or
    /// the backend returned no text
    BadJsonOrTimeout,
    /// Backend answered with a non-success status
    BackendError {
        /// HTTP status returned by the backend
        status: u16,
    },
    /// Transport-level failure talking to the backend
    Exception,
}

impl FailureReason {
    /// Parse the wire representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "missing_api_key" => Some(Self::MissingApiKey),
            "bad_json_or_timeout" => Some(Self::BadJsonOrTimeout),
            "exception" => Some(Self::Exception),
            other => other
                .strip_prefix("backend_error_")
                .and_then(|status| status.parse().ok())
                .map(|status| Self::BackendError { status }),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => f.write_str("missing_api_key"),
            Self::BadJsonOrTimeout => f.write_str("bad_json_or_timeout"),
            Self::BackendError { status } => write!(f, "backend_error_{status}"),
            Self::Exception => f.write_str("exception"),
        }
    }
}

impl Serialize for FailureReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FailureReason {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown failure reason '{raw}'")))
    }
}

/// Provenance annotation for a plan
///
/// Not part of the plan's semantic schema. Callers use it to tell real
/// model output apart from degraded output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    /// Model identifier the pipeline was configured with
    pub model: String,
    /// Whether the strict second attempt was issued
    pub retry: bool,
    /// Whether the plan came from the deterministic fallback
    pub fallback: bool,
    /// Failure reason when `fallback` is set
    pub reason: Option<FailureReason>,
    /// Best available raw backend text, for diagnostics
    pub raw: Option<String>,
    /// Number of network attempts issued (0-2)
    pub attempts: u8,
    /// Per-request correlation id
    pub request_id: Uuid,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

impl PlanMetadata {
    /// Metadata for a fresh request with no attempts yet
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            retry: false,
            fallback: false,
            reason: None,
            raw: None,
            attempts: 0,
            request_id: Uuid::new_v4(),
            generated_at: Utc::now(),
        }
    }

    /// Mark this metadata as describing degraded output
    #[must_use]
    pub fn degraded(mut self, reason: FailureReason, raw: Option<String>) -> Self {
        self.fallback = true;
        self.reason = Some(reason);
        self.raw = raw;
        self
    }
}

/// Response document: the plan with its metadata under `meta`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    /// The plan itself
    #[serde(flatten)]
    pub plan: Plan,
    /// Diagnostics
    pub meta: PlanMetadata,
}
