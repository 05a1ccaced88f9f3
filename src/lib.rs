// ABOUTME: Main library entry point for the Pierre plan generation server
// ABOUTME: Turns athlete profiles into LLM-generated weekly plans with a deterministic fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Plan Server
//!
//! Generates weekly training-and-meal plans from a user profile by
//! delegating content to an LLM completion backend, then coercing the
//! model's free-form text into a strictly typed plan.
//!
//! ## Features
//!
//! - **Lenient input**: any JSON object normalizes to a complete profile
//! - **Bounded calls**: every completion attempt runs under a deadline
//! - **One strict retry**: a second attempt demands JSON only
//! - **Salvage parsing**: JSON is recovered from prose and code fences
//! - **Total output**: a deterministic fallback plan when the model fails
//!
//! ## Architecture
//!
//! - **Generation**: normalizer, prompt builder, extractor, fallback, orchestrator
//! - **LLM**: the `CompletionClient` seam and its HTTP implementation
//! - **Routes**: axum handlers for `POST /api/plan` and health checks
//! - **Config**: environment resolved once at startup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pierre_plan_server::config::ServerConfig;
//! use pierre_plan_server::generation::{GenerationSettings, PlanGenerator};
//! use pierre_plan_server::llm::HttpCompletionClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let client = HttpCompletionClient::new(config.llm.clone())?;
//!     let generator = PlanGenerator::new(
//!         Arc::new(client),
//!         GenerationSettings::from_config(&config.llm),
//!     );
//!
//!     let response = generator
//!         .generate_from_value(&json!({ "goal": "strength", "calorieTarget": 2600 }))
//!         .await;
//!     println!("fallback used: {}", response.meta.fallback);
//!     Ok(())
//! }
//! ```

/// One-shot plan generation for the command line
pub mod cli;

/// Configuration management
pub mod config;

/// Plan generation pipeline
pub mod generation;

/// LLM completion client abstraction
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// HTTP routes
pub mod routes;

pub use pierre_plan_core::{constants, errors, models};
