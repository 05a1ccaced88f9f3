// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Resolves every environment variable once into a typed ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Every variable is read exactly once here, at the composition root. Empty
//! values are treated the same as unset ones.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use pierre_plan_core::constants::{generation, ports};
use tracing::info;

use super::types::{Environment, FailurePolicy};

/// Temperature range accepted by chat completion backends
const TEMPERATURE_RANGE: (f32, f32) = (0.0, 2.0);

/// Completion backend settings
#[derive(Clone)]
pub struct LlmConfig {
    /// Bearer credential; `None` means the pipeline serves fallback plans
    pub api_key: Option<String>,
    /// Model identifier sent with every request
    pub model: String,
    /// Base URL; `/chat/completions` is appended
    pub base_url: String,
    /// Per-attempt deadline in milliseconds
    pub timeout_ms: u64,
    /// Output token bound
    pub max_tokens: u32,
    /// Attempt-1 temperature
    pub temperature: f32,
    /// Attempt-2 (strict) temperature
    pub retry_temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: generation::DEFAULT_MODEL.to_owned(),
            base_url: generation::DEFAULT_BASE_URL.to_owned(),
            timeout_ms: generation::DEFAULT_TIMEOUT_MS,
            max_tokens: generation::DEFAULT_MAX_TOKENS,
            temperature: generation::FIRST_ATTEMPT_TEMPERATURE,
            retry_temperature: generation::RETRY_TEMPERATURE,
        }
    }
}

// The credential must never reach the logs
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("retry_temperature", &self.retry_temperature)
            .finish()
    }
}

impl LlmConfig {
    /// Environment variable holding the backend credential
    pub const API_KEY_ENV_VAR: &'static str = "OPENAI_API_KEY";
    /// Environment variable holding the model identifier
    pub const MODEL_ENV_VAR: &'static str = "OPENAI_MODEL";
    /// Environment variable holding the backend base URL
    pub const BASE_URL_ENV_VAR: &'static str = "OPENAI_BASE_URL";

    /// Load backend settings from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            api_key: env_non_empty(Self::API_KEY_ENV_VAR),
            model: env_non_empty(Self::MODEL_ENV_VAR).unwrap_or(defaults.model),
            base_url: env_non_empty(Self::BASE_URL_ENV_VAR)
                .map_or(defaults.base_url, |url| url.trim_end_matches('/').to_owned()),
            timeout_ms: env_parse_or("PLAN_LLM_TIMEOUT_MS", defaults.timeout_ms)?,
            max_tokens: env_parse_or("PLAN_LLM_MAX_TOKENS", defaults.max_tokens)?,
            temperature: env_temperature("PLAN_LLM_TEMPERATURE", defaults.temperature)?,
            retry_temperature: env_temperature(
                "PLAN_LLM_RETRY_TEMPERATURE",
                defaults.retry_temperature,
            )?,
        })
    }

    /// Whether a credential is present
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Per-attempt deadline
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Cross-origin settings
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated origin allow-list, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Cross-origin settings
    pub cors: CorsConfig,
    /// Completion backend settings
    pub llm: LlmConfig,
    /// Behavior for degraded outcomes
    pub failure_policy: FailurePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            cors: CorsConfig::default(),
            llm: LlmConfig::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_parse_or("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
            environment: Environment::from_env(),
            cors: CorsConfig {
                allowed_origins: env_non_empty("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| CorsConfig::default().allowed_origins),
            },
            llm: LlmConfig::from_env()?,
            failure_policy: env_non_empty(FailurePolicy::ENV_VAR)
                .map(|s| FailurePolicy::from_str_or_default(&s))
                .unwrap_or_default(),
        };

        info!(
            http_port = config.http_port,
            model = %config.llm.model,
            credential_present = config.llm.has_api_key(),
            failure_policy = %config.failure_policy,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Human-readable configuration summary, safe to log
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Pierre Plan Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - CORS Origins: {}\n\
             - Model: {}\n\
             - Base URL: {}\n\
             - Credential: {}\n\
             - Timeout: {} ms\n\
             - Max Tokens: {}\n\
             - Temperatures: {} / {}\n\
             - Failure Policy: {}",
            self.http_port,
            self.environment,
            self.cors.allowed_origins,
            self.llm.model,
            self.llm.base_url,
            if self.llm.has_api_key() {
                "Configured"
            } else {
                "Missing"
            },
            self.llm.timeout_ms,
            self.llm.max_tokens,
            self.llm.temperature,
            self.llm.retry_temperature,
            self.failure_policy,
        )
    }
}

/// Read a variable, treating empty or whitespace-only values as unset
fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parse a variable or fall back to the default when unset
fn env_parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_non_empty(key).map_or(Ok(default), |raw| {
        raw.parse()
            .with_context(|| format!("Invalid {key} value: '{raw}'"))
    })
}

/// Parse a temperature, clamping into range; non-finite values use `default`
fn env_temperature(key: &str, default: f32) -> Result<f32> {
    env_parse_or(key, default).map(|value| clamp_temperature(value, default))
}

fn clamp_temperature(value: f32, default: f32) -> f32 {
    if value.is_finite() {
        value.clamp(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1)
    } else {
        default
    }
}
