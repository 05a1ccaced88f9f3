// ABOUTME: Logging configuration and structured logging setup for the plan server
// ABOUTME: Builds the tracing subscriber with env filtering, noise reduction, and output formats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration
//!
//! `RUST_LOG` selects the level, `LOG_FORMAT` the output (`json`, `pretty`,
//! `compact`). Chatty HTTP client and server targets are capped regardless
//! of the requested level.

use std::env;
use std::io;

use anyhow::Result;
use pierre_plan_core::constants::service_names;
use tracing::info;
use tracing_subscriber::{
    filter::{Directive, LevelFilter},
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::Environment;

/// Third-party targets that are always capped to keep logs readable
const NOISE_DIRECTIVES: [&str; 4] = [
    "hyper=warn",
    "hyper::proto=warn",
    "reqwest=warn",
    "tower_http=info",
];

type OutputLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name reported at startup
    pub service_name: String,
    /// Service version reported at startup
    pub service_version: String,
    /// Deployment environment
    pub environment: Environment,
    /// Write to stderr instead of stdout
    pub use_stderr: bool,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers
    Json,
    /// Multi-field human output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, defaulting to pretty output
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
            include_location: false,
            include_spans: false,
            service_name: service_names::PIERRE_PLAN_SERVER.to_owned(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: Environment::default(),
            use_stderr: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    ///
    /// Production deployments always get source locations and span events.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let environment = Environment::from_env();
        let verbose = environment.is_production();

        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT")
                .map(|s| LogFormat::from_str_or_default(&s))
                .unwrap_or_default(),
            include_location: verbose || env_flag("LOG_INCLUDE_LOCATION"),
            include_spans: verbose || env_flag("LOG_INCLUDE_SPANS"),
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            service_version: env::var("SERVICE_VERSION").unwrap_or(defaults.service_version),
            environment,
            use_stderr: false,
        }
    }

    /// Route log output to stderr, leaving stdout for command output
    #[must_use]
    pub const fn with_stderr(mut self) -> Self {
        self.use_stderr = true;
        self
    }

    /// Level filter with noise caps layered on top
    ///
    /// A bare level also pins this crate's target to it. A full directive
    /// list is used as given.
    fn env_filter(&self) -> EnvFilter {
        let filter = NOISE_DIRECTIVES
            .iter()
            .filter_map(|directive| directive.parse::<Directive>().ok())
            .fold(EnvFilter::new(&self.level), EnvFilter::add_directive);

        match self.level.trim().parse::<LevelFilter>() {
            Ok(level) => filter.add_directive(
                format!("pierre_plan_server={level}")
                    .parse()
                    .unwrap_or_else(|_| level.into()),
            ),
            Err(_) => filter,
        }
    }

    fn writer(&self) -> BoxMakeWriter {
        if self.use_stderr {
            BoxMakeWriter::new(io::stderr)
        } else {
            BoxMakeWriter::new(io::stdout)
        }
    }

    fn output_layer(&self) -> OutputLayer {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = fmt::layer().with_writer(self.writer());

        match self.format {
            LogFormat::Json => layer
                .json()
                .with_current_span(true)
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_span_events(span_events)
                .boxed(),
            LogFormat::Pretty => layer
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_span_events(span_events)
                .boxed(),
            LogFormat::Compact => layer.compact().with_target(false).boxed(),
        }
    }

    /// Install the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.output_layer())
            .with(self.env_filter())
            .try_init()?;

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            log.location = self.include_location,
            log.spans = self.include_spans,
            "Logging configured"
        );
        Ok(())
    }
}

/// Set to anything but `0`/`false`
fn env_flag(key: &str) -> bool {
    env::var(key).is_ok_and(|value| !matches!(value.trim(), "0" | "false" | ""))
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}
