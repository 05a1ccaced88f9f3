// ABOUTME: Canonical user profile model for plan generation
// ABOUTME: Holds normalized body metrics, preferences, and exclusion sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::profile_defaults;

/// Normalized user profile
///
/// Built once per request from caller-supplied data and never mutated
/// afterwards. Body metrics are canonical metric units (kg, cm). String sets
/// are `BTreeSet` so that rendering order does not depend on caller order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Age in years
    pub age: Option<u32>,
    /// Sex as supplied by the caller
    pub sex: String,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    /// Primary goal (fat loss, muscle gain, performance...)
    pub goal: String,
    /// Daily activity level outside training
    pub activity_level: String,
    /// Daily calorie target in kcal
    pub calorie_target: u32,
    /// Average sleep per night in hours
    pub sleep_hours: Option<f64>,
    /// Self-reported stress level
    pub stress_level: String,
    /// Training days per week, always within 1..=7
    pub days_per_week: u8,
    /// Diet style (balanced, vegetarian, keto...)
    pub diet_style: String,
    /// Equipment access category (full gym, home, none...)
    pub equipment_access: String,
    /// Sports practiced
    pub sports: BTreeSet<String>,
    /// Available equipment items
    pub equipment: BTreeSet<String>,
    /// Current injuries
    pub injuries: BTreeSet<String>,
    /// Medical conditions
    pub medical_conditions: BTreeSet<String>,
    /// Food allergies
    pub allergies: BTreeSet<String>,
    /// Disliked foods
    pub dislikes: BTreeSet<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            age: None,
            sex: String::new(),
            height_cm: None,
            weight_kg: None,
            goal: String::new(),
            activity_level: String::new(),
            calorie_target: profile_defaults::CALORIE_TARGET,
            sleep_hours: None,
            stress_level: String::new(),
            days_per_week: profile_defaults::DAYS_PER_WEEK,
            diet_style: String::new(),
            equipment_access: String::new(),
            sports: BTreeSet::new(),
            equipment: BTreeSet::new(),
            injuries: BTreeSet::new(),
            medical_conditions: BTreeSet::new(),
            allergies: BTreeSet::new(),
            dislikes: BTreeSet::new(),
        }
    }
}

impl Profile {
    /// Diet style for display, or the unspecified marker
    #[must_use]
    pub fn diet_style_or_marker(&self) -> &str {
        if self.diet_style.is_empty() {
            profile_defaults::UNSPECIFIED_MARKER
        } else {
            &self.diet_style
        }
    }
}
