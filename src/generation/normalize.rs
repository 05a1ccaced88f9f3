// ABOUTME: Profile normalizer turning arbitrary caller JSON into a canonical Profile
// ABOUTME: Handles key aliases, numeric strings, unit conversion, and set cleanup without failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Profile normalization
//!
//! [`normalize`] never fails. Anything it cannot interpret is treated as
//! absent and replaced by the field's default.

use std::collections::BTreeSet;

use pierre_plan_core::constants::{plan_limits, profile_defaults, units};
use pierre_plan_core::models::Profile;
use serde_json::{Map, Value};

/// Normalize caller-supplied profile data
///
/// Keys are accepted in snake_case or camelCase. A non-object input yields
/// the all-defaults profile.
#[must_use]
pub fn normalize(raw: &Value) -> Profile {
    let Some(obj) = raw.as_object() else {
        return Profile::default();
    };

    Profile {
        age: positive_number(obj, &["age"]).map(|age| age.round() as u32),
        sex: text(obj, &["sex", "gender"]),
        height_cm: height_cm(obj),
        weight_kg: weight_kg(obj),
        goal: text(obj, &["goal", "primary_goal"]),
        activity_level: text(obj, &["activity_level", "activity"]),
        calorie_target: positive_number(obj, &["calorie_target", "calories", "kcal"])
            .map_or(profile_defaults::CALORIE_TARGET, |kcal| kcal.round() as u32),
        sleep_hours: positive_number(obj, &["sleep_hours", "sleep"]).map(round_tenth),
        stress_level: text(obj, &["stress_level", "stress"]),
        days_per_week: days_per_week(obj),
        diet_style: text(obj, &["diet_style", "diet"]),
        equipment_access: text(obj, &["equipment_access"]),
        sports: string_set(obj, &["sports"]),
        equipment: string_set(obj, &["equipment"]),
        injuries: string_set(obj, &["injuries"]),
        medical_conditions: string_set(obj, &["medical_conditions", "conditions"]),
        allergies: string_set(obj, &["allergies"]),
        dislikes: string_set(obj, &["dislikes", "food_dislikes"]),
    }
}

/// `calorie_target` -> `calorieTarget`
fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// First non-null value under any alias, trying each in snake and camel form
fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        obj.get(*key)
            .filter(|v| !v.is_null())
            .or_else(|| obj.get(&camel_case(key)).filter(|v| !v.is_null()))
    })
}

/// JSON number or numeric string; non-finite or unparseable values are absent
fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn positive_number(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    lookup(obj, keys).and_then(number).filter(|n| *n > 0.0)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn text(obj: &Map<String, Value>, keys: &[&str]) -> String {
    match lookup(obj, keys) {
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => value.to_string(),
        _ => String::new(),
    }
}

fn days_per_week(obj: &Map<String, Value>) -> u8 {
    lookup(obj, &["days_per_week", "training_days"])
        .and_then(number)
        .filter(|n| *n >= 0.0)
        .map_or(profile_defaults::DAYS_PER_WEEK, |days| {
            let clamped = days
                .round()
                .clamp(f64::from(plan_limits::MIN_DAY), f64::from(plan_limits::MAX_DAY));
            clamped as u8
        })
}

/// Whether bare `weight`/`height` values are in pounds and inches
fn uses_imperial_units(obj: &Map<String, Value>) -> bool {
    matches!(
        text(obj, &["units", "unit_system"]).to_lowercase().as_str(),
        "imperial" | "us" | "lb" | "lbs"
    )
}

fn weight_kg(obj: &Map<String, Value>) -> Option<f64> {
    let kg = positive_number(obj, &["weight_kg"])
        .or_else(|| {
            positive_number(obj, &["weight_lb", "weight_lbs"]).map(|lb| lb * units::KG_PER_LB)
        })
        .or_else(|| {
            positive_number(obj, &["weight"]).map(|weight| {
                if uses_imperial_units(obj) {
                    weight * units::KG_PER_LB
                } else {
                    weight
                }
            })
        })?;
    Some(round_tenth(kg))
}

fn height_cm(obj: &Map<String, Value>) -> Option<f64> {
    if let Some(cm) = positive_number(obj, &["height_cm"]) {
        return Some(round_tenth(cm));
    }

    let feet = positive_number(obj, &["height_ft", "height_feet"]);
    let inches = positive_number(obj, &["height_in", "height_inches"]);
    if feet.is_some() || inches.is_some() {
        let total_inches = feet.unwrap_or(0.0) * units::INCHES_PER_FOOT + inches.unwrap_or(0.0);
        return Some(round_tenth(total_inches * units::CM_PER_INCH));
    }

    positive_number(obj, &["height"]).map(|height| {
        if uses_imperial_units(obj) {
            round_tenth(height * units::CM_PER_INCH)
        } else {
            round_tenth(height)
        }
    })
}

/// Array of strings or a comma-separated string, trimmed and lowercased
fn string_set(obj: &Map<String, Value>, keys: &[&str]) -> BTreeSet<String> {
    let entries: Vec<String> = match lookup(obj, keys) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_owned).collect(),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty() && entry != profile_defaults::EMPTY_SET_MARKER)
        .collect()
}
