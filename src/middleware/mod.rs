// ABOUTME: HTTP middleware for the plan server router
// ABOUTME: Exposes the CORS layer configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cross-origin resource sharing configuration
pub mod cors;

pub use cors::setup_cors;
