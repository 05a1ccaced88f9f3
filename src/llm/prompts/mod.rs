// ABOUTME: System prompts for plan generation loaded at compile time
// ABOUTME: Provides the coaching directive and the strict JSON-only retry instruction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Coaching directive sent as the system message of every attempt
///
/// Contains:
/// - Role and output discipline
/// - Programming rules (movement order, volume, substitutions)
/// - Nutrition rules (calorie tolerance, exclusions)
pub const PLAN_SYSTEM_PROMPT: &str = include_str!("plan_system.md");

/// Instruction appended to the user content on the strict retry
pub const STRICT_JSON_SUFFIX: &str = "IMPORTANT: Your previous reply could not be used. \
Reply with ONLY a single JSON object matching the schema above. \
Do not use markdown code fences. Do not add any text before or after the object.";
