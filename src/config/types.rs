// ABOUTME: Strongly typed configuration values parsed from environment strings
// ABOUTME: Defines the deployment environment and the degraded-output failure policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Load from the `ENVIRONMENT` variable
    #[must_use]
    pub fn from_env() -> Self {
        env::var("ENVIRONMENT")
            .map(|s| Self::from_str_or_default(&s))
            .unwrap_or_default()
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// What the HTTP surface does when the pipeline had to degrade
///
/// The pipeline itself always produces a plan. The policy only decides
/// whether a degraded plan is served as-is or turned into an error status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Always answer 200 with the fallback plan and degraded metadata
    #[default]
    Fallback,
    /// Answer 502 (or 500 for a missing credential) instead of a fallback plan
    Error,
}

impl FailurePolicy {
    /// Environment variable selecting the policy
    pub const ENV_VAR: &'static str = "PLAN_FAILURE_POLICY";

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "error" | "strict" => Self::Error,
            _ => Self::Fallback,
        }
    }
}

impl Display for FailurePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fallback => write!(f, "fallback"),
            Self::Error => write!(f, "error"),
        }
    }
}
