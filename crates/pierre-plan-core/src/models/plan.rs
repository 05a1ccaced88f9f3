// ABOUTME: Typed weekly plan model with day, workout, and meal records
// ABOUTME: Converts untrusted JSON values into a shape-checked Plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::constants::plan_limits::{MAX_DAY, MIN_DAY};

/// Training focus of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    /// Upper body
    Upper,
    /// Lower body
    Lower,
    /// Full body
    Full,
    /// Active recovery
    Recovery,
    /// Conditioning / cardio
    Conditioning,
    /// Hypertrophy block
    Hypertrophy,
    /// Power / explosive work
    Power,
    /// Mobility work
    Mobility,
}

impl Focus {
    /// Every focus tag, in schema order
    pub const ALL: [Self; 8] = [
        Self::Upper,
        Self::Lower,
        Self::Full,
        Self::Recovery,
        Self::Conditioning,
        Self::Hypertrophy,
        Self::Power,
        Self::Mobility,
    ];

    /// Wire representation of the tag
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Full => "full",
            Self::Recovery => "recovery",
            Self::Conditioning => "conditioning",
            Self::Hypertrophy => "hypertrophy",
            Self::Power => "power",
            Self::Mobility => "mobility",
        }
    }

    /// Parse a tag, ignoring case and surrounding whitespace
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|focus| focus.as_str() == lower)
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Focus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Focus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown focus tag '{raw}'")))
    }
}

/// One exercise prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutItem {
    /// Exercise name
    pub exercise: String,
    /// Number of working sets
    #[serde(deserialize_with = "whole_number")]
    pub sets: u32,
    /// Rep descriptor ("8-10", "AMRAP", "30s")
    #[serde(deserialize_with = "rep_descriptor")]
    pub reps: String,
    /// Rest between sets in seconds
    #[serde(deserialize_with = "whole_number")]
    pub rest_sec: u32,
    /// Optional coaching note or substitution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One meal with macros
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    /// Meal name
    pub name: String,
    /// Energy in kcal
    #[serde(deserialize_with = "lenient_f64")]
    pub kcal: f64,
    /// Protein in grams
    #[serde(deserialize_with = "lenient_f64")]
    pub protein_g: f64,
    /// Carbohydrates in grams
    #[serde(deserialize_with = "lenient_f64")]
    pub carbs_g: f64,
    /// Fat in grams
    #[serde(deserialize_with = "lenient_f64")]
    pub fat_g: f64,
    /// Ingredient list
    pub ingredients: Vec<String>,
    /// Preparation steps
    pub instructions: Vec<String>,
}

/// One day of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day index within the week, 1..=7
    #[serde(deserialize_with = "whole_number")]
    pub day: u8,
    /// Training focus
    pub focus: Focus,
    /// Ordered exercises, compound movements first
    pub workout: Vec<WorkoutItem>,
    /// Ordered meals
    pub meals: Vec<MealItem>,
}

// Model output drifts between `10`, `10.0` and `"10"` for the same field.
// The helpers below accept all three while keeping the target type strict.

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Non-negative whole number from an integer, a whole float, or a numeric string
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = Value::deserialize(deserializer)?;
    numeric(&value)
        .filter(|n| n.is_finite() && *n >= 0.0 && n.fract().abs() < f64::EPSILON)
        .and_then(|n| T::try_from(n as u64).ok())
        .ok_or_else(|| {
            serde::de::Error::custom(format!("expected a non-negative whole number, found {value}"))
        })
}

/// Number or numeric string; range checks happen in [`Plan::validate`]
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    numeric(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a number, found {value}")))
}

/// Rep descriptors are text, but models often send a bare count
fn rep_descriptor<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract().abs() < f64::EPSILON)
            .map_or_else(|| n.to_string(), |f| (f as u64).to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a rep descriptor, found {other}"
        ))),
    }
}

/// Weekly plan returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Between one and seven days
    pub week: Vec<DayPlan>,
    /// Optional top-level guidance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Reasons a JSON value does not qualify as a [`Plan`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanShapeError {
    /// Value does not deserialize into the plan structure
    #[error("plan structure mismatch: {0}")]
    Structure(String),
    /// Plan has zero or more than seven days
    #[error("plan must contain 1-7 days, found {0}")]
    DayCount(usize),
    /// A day index falls outside 1..=7
    #[error("day index {0} is outside 1-7")]
    DayIndex(u8),
    /// Two entries share a day index
    #[error("day index {0} appears more than once")]
    DuplicateDay(u8),
    /// A numeric field is negative or not finite
    #[error("day {day}: field '{field}' must be a non-negative number")]
    InvalidNumber {
        /// Day index containing the bad value
        day: u8,
        /// Field name
        field: &'static str,
    },
}

impl Plan {
    /// Convert an untrusted JSON value into a shape-checked plan
    ///
    /// # Errors
    ///
    /// Returns [`PlanShapeError`] if the value is missing required keys,
    /// carries an unknown focus tag, or violates the day and numeric ranges.
    pub fn from_value(value: Value) -> Result<Self, PlanShapeError> {
        let plan: Self = serde_json::from_value(value)
            .map_err(|e| PlanShapeError::Structure(e.to_string()))?;
        plan.validate()?;
        Ok(plan)
    }

    /// Check day count, distinct day indices, and numeric ranges
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanShapeError`] found.
    pub fn validate(&self) -> Result<(), PlanShapeError> {
        let count = self.week.len();
        if count < usize::from(MIN_DAY) || count > usize::from(MAX_DAY) {
            return Err(PlanShapeError::DayCount(count));
        }

        let mut seen = 0_u8;
        for day in &self.week {
            if !(MIN_DAY..=MAX_DAY).contains(&day.day) {
                return Err(PlanShapeError::DayIndex(day.day));
            }
            let bit = 1_u8 << (day.day - 1);
            if seen & bit != 0 {
                return Err(PlanShapeError::DuplicateDay(day.day));
            }
            seen |= bit;

            for meal in &day.meals {
                let fields = [
                    ("kcal", meal.kcal),
                    ("protein_g", meal.protein_g),
                    ("carbs_g", meal.carbs_g),
                    ("fat_g", meal.fat_g),
                ];
                if let Some((field, _)) = fields
                    .into_iter()
                    .find(|(_, value)| !value.is_finite() || *value < 0.0)
                {
                    return Err(PlanShapeError::InvalidNumber {
                        day: day.day,
                        field,
                    });
                }
            }
        }

        Ok(())
    }

    /// Sum of meal kcal across every day
    #[must_use]
    pub fn total_kcal(&self) -> f64 {
        self.week
            .iter()
            .flat_map(|day| day.meals.iter())
            .map(|meal| meal.kcal)
            .sum()
    }
}
