// ABOUTME: Core types and constants for the Pierre weekly plan generator
// ABOUTME: Foundation crate with error handling, profile/plan models, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Plan Core
//!
//! Foundation crate providing shared types and constants for the Pierre
//! weekly plan generator. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Defaults and unit conversion factors
//! - **models**: `Profile`, `Plan`, and the diagnostic `PlanMetadata`

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Profile, Plan, metadata)
pub mod models;
