// ABOUTME: Core data models module for the weekly plan generator
// ABOUTME: Re-exports Profile, Plan, and diagnostic metadata types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - [`Profile`]: canonical, normalized user input
//! - [`Plan`]: the typed week of workouts and meals
//! - [`PlanMetadata`]: provenance annotation attached to every response

mod metadata;
mod plan;
mod profile;

pub use metadata::{FailureReason, PlanMetadata, PlanResponse};
pub use plan::{DayPlan, Focus, MealItem, Plan, PlanShapeError, WorkoutItem};
pub use profile::Profile;
