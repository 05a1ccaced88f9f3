// ABOUTME: Deterministic fallback plan generator used when model output cannot be trusted
// ABOUTME: Builds a schema-valid full-body day with meals scaled exactly to the calorie target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fallback plan
//!
//! Pure and network-free. The same profile always yields the same plan.

use pierre_plan_core::constants::nutrition;
use pierre_plan_core::models::{
    DayPlan, FailureReason, Focus, MealItem, Plan, PlanMetadata, PlanResponse, Profile,
    WorkoutItem,
};

/// (exercise, sets, reps, rest seconds), compound movements first
const MOVEMENTS: [(&str, u32, &str, u32); 6] = [
    ("Goblet Squat", 3, "8-10", 90),
    ("Romanian Deadlift", 3, "8-10", 90),
    ("Push-Up", 3, "10-12", 60),
    ("One-Arm Dumbbell Row", 3, "10-12 each side", 60),
    ("Reverse Lunge", 2, "10 each side", 60),
    ("Plank", 3, "30s", 45),
];

/// (name, ingredients, instructions) in breakfast, lunch, dinner order
const MEALS: [(&str, &[&str], &[&str]); 3] = [
    (
        "Breakfast",
        &["rolled oats", "yogurt or plant yogurt", "berries", "chia seeds"],
        &[
            "Cook the oats with water or milk of choice.",
            "Top with yogurt, berries, and chia seeds.",
        ],
    ),
    (
        "Lunch",
        &["rice", "lean protein of choice", "mixed vegetables", "olive oil"],
        &[
            "Cook the rice.",
            "Saute the protein and vegetables in olive oil.",
            "Serve over the rice.",
        ],
    ),
    (
        "Dinner",
        &["potatoes", "fish, legumes, or lean meat", "green salad", "olive oil"],
        &[
            "Roast the potatoes.",
            "Cook the protein until done.",
            "Serve with the salad dressed in olive oil.",
        ],
    ),
];

/// Build the fallback plan for a profile
#[must_use]
pub fn fallback_plan(profile: &Profile) -> Plan {
    let injury_note = (!profile.injuries.is_empty()).then(|| {
        format!(
            "Swap for a pain-free variation if this aggravates: {}.",
            profile
                .injuries
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        )
    });

    let workout = MOVEMENTS
        .iter()
        .map(|&(exercise, sets, reps, rest_sec)| WorkoutItem {
            exercise: exercise.to_owned(),
            sets,
            reps: reps.to_owned(),
            rest_sec,
            notes: injury_note.clone(),
        })
        .collect();

    let meals = split_calories(profile.calorie_target)
        .into_iter()
        .zip(MEALS)
        .map(|(kcal, (name, ingredients, instructions))| meal(name, kcal, ingredients, instructions))
        .collect();

    Plan {
        week: vec![DayPlan {
            day: 1,
            focus: Focus::Full,
            workout,
            meals,
        }],
        notes: Some(guidance(profile)),
    }
}

/// Fallback plan wrapped with degraded metadata
#[must_use]
pub fn fallback(
    profile: &Profile,
    meta: PlanMetadata,
    reason: FailureReason,
    raw: Option<String>,
) -> PlanResponse {
    PlanResponse {
        plan: fallback_plan(profile),
        meta: meta.degraded(reason, raw),
    }
}

/// Integer kcal per meal; the last meal absorbs the rounding remainder
fn split_calories(target: u32) -> [u32; 3] {
    let [breakfast_pct, lunch_pct, _] = nutrition::MEAL_SPLIT_PERCENT;
    let share = |pct: u32| (u64::from(target) * u64::from(pct) + 50) / 100;
    let breakfast = share(breakfast_pct) as u32;
    let lunch = share(lunch_pct) as u32;
    let dinner = target.saturating_sub(breakfast).saturating_sub(lunch);
    [breakfast, lunch, dinner]
}

fn meal(name: &str, kcal: u32, ingredients: &[&str], instructions: &[&str]) -> MealItem {
    let kcal = f64::from(kcal);
    MealItem {
        name: name.to_owned(),
        kcal,
        protein_g: (kcal * nutrition::PROTEIN_SHARE / nutrition::KCAL_PER_G_PROTEIN).round(),
        carbs_g: (kcal * nutrition::CARB_SHARE / nutrition::KCAL_PER_G_CARB).round(),
        fat_g: (kcal * nutrition::FAT_SHARE / nutrition::KCAL_PER_G_FAT).round(),
        ingredients: ingredients.iter().map(|&s| s.to_owned()).collect(),
        instructions: instructions.iter().map(|&s| s.to_owned()).collect(),
    }
}

fn guidance(profile: &Profile) -> String {
    let mut notes = format!(
        "Generic full-body session and meal template. Diet style: {}. Meals total {} kcal.",
        profile.diet_style_or_marker(),
        profile.calorie_target
    );
    if !profile.allergies.is_empty() {
        notes.push_str(" Replace any ingredient containing: ");
        notes.push_str(
            &profile
                .allergies
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        );
        notes.push('.');
    }
    notes
}
