// ABOUTME: Plan generation route handler for POST /api/plan
// ABOUTME: Parses the raw profile body, runs the pipeline, and applies the failure policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan generation routes

use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use pierre_plan_core::errors::{AppError, AppResult};
use pierre_plan_core::models::{FailureReason, PlanResponse};
use serde_json::{json, Value};
use tracing::info;

use crate::config::FailurePolicy;
use crate::generation::PlanGenerator;

/// Shared state for plan routes
#[derive(Clone)]
pub struct PlanRouteState {
    /// Pipeline shared across requests
    pub generator: Arc<PlanGenerator>,
    /// What to do with degraded outcomes
    pub failure_policy: FailurePolicy,
}

/// Plan routes implementation
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create the plan generation routes
    ///
    /// Only `POST` reaches the pipeline. Every other method on the path gets
    /// a fixed 405 body.
    pub fn routes(state: PlanRouteState) -> Router {
        Router::new()
            .route(
                "/api/plan",
                post(handle_generate_plan).fallback(handle_method_not_allowed),
            )
            .with_state(state)
    }
}

async fn handle_generate_plan(
    State(state): State<PlanRouteState>,
    body: Bytes,
) -> AppResult<Json<PlanResponse>> {
    let raw = parse_body(&body)?;
    let response = state.generator.generate_from_value(&raw).await;

    info!(
        request_id = %response.meta.request_id,
        fallback = response.meta.fallback,
        retry = response.meta.retry,
        attempts = response.meta.attempts,
        "Plan generated"
    );

    apply_failure_policy(state.failure_policy, response).map(Json)
}

async fn handle_method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

/// Decode a raw profile body; an empty body means an empty profile
///
/// # Errors
///
/// Returns an invalid input error when the body is not JSON.
pub fn parse_body(body: &[u8]) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::invalid_input(format!("Request body is not valid JSON: {e}")))
}

/// Turn degraded outcomes into errors when the policy asks for it
///
/// # Errors
///
/// Under [`FailurePolicy::Error`], a fallback plan becomes a config error
/// (missing credential) or an external service error (anything else).
pub fn apply_failure_policy(
    policy: FailurePolicy,
    response: PlanResponse,
) -> AppResult<PlanResponse> {
    if policy == FailurePolicy::Fallback || !response.meta.fallback {
        return Ok(response);
    }

    let meta = response.meta;
    let details = json!({
        "reason": meta.reason,
        "raw": meta.raw,
        "request_id": meta.request_id,
    });

    let error = match meta.reason {
        Some(FailureReason::MissingApiKey) => {
            AppError::config("Completion backend credential is not configured")
        }
        _ => AppError::external_service("completion backend", "plan generation failed"),
    };

    Err(error.with_details(details))
}
