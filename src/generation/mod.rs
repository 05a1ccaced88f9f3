// ABOUTME: Plan generation pipeline from raw profile data to a validated weekly plan
// ABOUTME: Wires the normalizer, prompt builder, extractor, fallback, and orchestrator together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generation Pipeline
//!
//! - [`normalize`]: arbitrary caller JSON to a canonical `Profile`
//! - [`prompt`]: deterministic system and user content for a profile
//! - [`extract`]: JSON recovery from unreliable model text
//! - [`fallback`]: network-free plan used when model output cannot be trusted
//! - [`PlanGenerator`]: the call, retry, and fallback state machine

pub mod extract;
pub mod fallback;
pub mod normalize;
mod orchestrator;
pub mod prompt;

pub use extract::{extract, ParseFailure};
pub use fallback::{fallback, fallback_plan};
pub use normalize::normalize;
pub use orchestrator::{GenerationSettings, PlanGenerator};
