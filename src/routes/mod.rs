// ABOUTME: Route module organization for the Pierre Plan Server HTTP endpoints
// ABOUTME: Assembles plan and health routes with CORS and request tracing layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Pierre Plan Server
//!
//! Each domain module holds route definitions and thin handlers that
//! delegate to the generation pipeline.

/// Health check and system status routes
pub mod health;
/// Plan generation routes
pub mod plan;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use health::HealthRoutes;
pub use plan::{PlanRouteState, PlanRoutes};

use crate::config::ServerConfig;
use crate::generation::PlanGenerator;
use crate::middleware::setup_cors;

/// Build the complete application router
///
/// CORS is the outermost layer so preflight requests and error responses
/// carry the cross-origin headers too.
pub fn build_router(generator: Arc<PlanGenerator>, config: &ServerConfig) -> Router {
    let plan_state = PlanRouteState {
        generator,
        failure_policy: config.failure_policy,
    };

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(PlanRoutes::routes(plan_state))
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors(&config.cors))
}
