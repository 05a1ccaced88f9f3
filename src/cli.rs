// ABOUTME: One-shot plan generation used by the `generate` subcommand
// ABOUTME: Reads a profile from a file or stdin and renders the plan response as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Command-line plan generation
//!
//! The profile body follows the same rules as `POST /api/plan`: blank
//! input is an empty profile, anything else must be JSON, and the failure
//! policy decides whether a fallback plan is printed or reported as an error.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::config::FailurePolicy;
use crate::generation::PlanGenerator;
use crate::routes::plan::{apply_failure_policy, parse_body};

/// Path that selects stdin instead of a file
pub const STDIN_PATH: &str = "-";

/// Read the profile body from `path`, or from stdin when it is `-`
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read as UTF-8.
pub async fn read_profile(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut body = String::new();
        tokio::io::stdin()
            .read_to_string(&mut body)
            .await
            .context("Failed to read profile from stdin")?;
        return Ok(body);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read profile {}", path.display()))
}

/// Run the pipeline once over `body` and render the response
///
/// # Errors
///
/// Returns an error if the body is not JSON, or if `policy` turns a
/// degraded outcome into an error.
pub async fn render_plan(
    generator: &PlanGenerator,
    policy: FailurePolicy,
    body: &str,
    pretty: bool,
) -> Result<String> {
    let raw = parse_body(body.as_bytes()).context("Profile is not valid JSON")?;
    let response = apply_failure_policy(policy, generator.generate_from_value(&raw).await)?;

    let rendered = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(rendered)
}
