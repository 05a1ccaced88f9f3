// ABOUTME: Prompt builder rendering a normalized Profile into system and user messages
// ABOUTME: Embeds every profile field, the domain rules, and the literal output schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Prompt construction
//!
//! Output is a pure function of the profile: the same profile always renders
//! byte-identical prompts. Absent values render as `unspecified` and empty
//! sets as `none`, never as an empty string or a placeholder token.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use pierre_plan_core::constants::{nutrition, profile_defaults, recovery};
use pierre_plan_core::models::{Focus, Profile};

use crate::llm::prompts::{PLAN_SYSTEM_PROMPT, STRICT_JSON_SUFFIX};
use crate::llm::PromptPair;

/// Build the attempt-1 prompt for a profile
#[must_use]
pub fn build(profile: &Profile) -> PromptPair {
    PromptPair::new(PLAN_SYSTEM_PROMPT, render_user_content(profile))
}

/// Extra instruction appended for the strict retry
#[must_use]
pub const fn strict_suffix() -> &'static str {
    STRICT_JSON_SUFFIX
}

/// Literal output schema embedded in every user prompt
#[must_use]
pub fn output_schema() -> String {
    let focus_tags = Focus::ALL
        .iter()
        .map(Focus::as_str)
        .collect::<Vec<_>>()
        .join("|");

    format!(
        r#"{{
  "week": [
    {{
      "day": <integer 1-7>,
      "focus": "{focus_tags}",
      "workout": [
        {{ "exercise": <string>, "sets": <integer>, "reps": <string>, "rest_sec": <integer>, "notes": <string, optional> }}
      ],
      "meals": [
        {{ "name": <string>, "kcal": <number>, "protein_g": <number>, "carbs_g": <number>, "fat_g": <number>, "ingredients": [<string>], "instructions": [<string>] }}
      ]
    }}
  ],
  "notes": <string, optional>
}}"#
    )
}

/// Signals that call for at least one recovery or mobility day
///
/// Each entry is a short human-readable description of the signal.
#[must_use]
pub fn recovery_signals(profile: &Profile) -> Vec<String> {
    let mut signals = Vec::new();

    if let Some(hours) = profile
        .sleep_hours
        .filter(|hours| *hours < recovery::MIN_RESTFUL_SLEEP_HOURS)
    {
        signals.push(format!(
            "sleep of {hours:.1} h is below {:.0} h",
            recovery::MIN_RESTFUL_SLEEP_HOURS
        ));
    }

    let stress = profile.stress_level.to_lowercase();
    if recovery::HIGH_STRESS_LEVELS.contains(&stress.as_str()) {
        signals.push(format!("reported stress is {stress}"));
    }

    if !profile.medical_conditions.is_empty() {
        signals.push(format!(
            "medical conditions reported ({})",
            join_set(&profile.medical_conditions)
        ));
    }

    signals
}

fn or_unspecified(value: &str) -> &str {
    if value.is_empty() {
        profile_defaults::UNSPECIFIED_MARKER
    } else {
        value
    }
}

fn join_set(set: &BTreeSet<String>) -> String {
    if set.is_empty() {
        profile_defaults::EMPTY_SET_MARKER.to_owned()
    } else {
        set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

fn measurement(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(
        || profile_defaults::UNSPECIFIED_MARKER.to_owned(),
        |v| format!("{v:.1} {unit}"),
    )
}

fn render_profile(out: &mut String, profile: &Profile) {
    let age = profile
        .age
        .map_or_else(|| profile_defaults::UNSPECIFIED_MARKER.to_owned(), |a| a.to_string());

    let lines = [
        ("Age", age),
        ("Sex", or_unspecified(&profile.sex).to_owned()),
        ("Height", measurement(profile.height_cm, "cm")),
        ("Weight", measurement(profile.weight_kg, "kg")),
        ("Goal", or_unspecified(&profile.goal).to_owned()),
        (
            "Activity level",
            or_unspecified(&profile.activity_level).to_owned(),
        ),
        (
            "Daily calorie target",
            format!("{} kcal", profile.calorie_target),
        ),
        ("Sleep", measurement(profile.sleep_hours, "h per night")),
        ("Stress level", or_unspecified(&profile.stress_level).to_owned()),
        (
            "Training days per week",
            profile.days_per_week.to_string(),
        ),
        ("Diet style", profile.diet_style_or_marker().to_owned()),
        (
            "Equipment access",
            or_unspecified(&profile.equipment_access).to_owned(),
        ),
        ("Available equipment", join_set(&profile.equipment)),
        ("Sports", join_set(&profile.sports)),
        ("Injuries", join_set(&profile.injuries)),
        ("Medical conditions", join_set(&profile.medical_conditions)),
        ("Allergies", join_set(&profile.allergies)),
        ("Food dislikes", join_set(&profile.dislikes)),
    ];

    out.push_str("## Athlete profile\n");
    for (label, value) in lines {
        let _ = writeln!(out, "- {label}: {value}");
    }
}

fn render_rules(out: &mut String, profile: &Profile) {
    let target = f64::from(profile.calorie_target);
    let low = (target * (1.0 - nutrition::CALORIE_TOLERANCE)).round();
    let high = (target * (1.0 + nutrition::CALORIE_TOLERANCE)).round();

    out.push_str("\n## Requirements\n");
    let _ = writeln!(
        out,
        "- Return a `week` array with exactly {} training days, each with a distinct `day` value from 1 to 7.",
        profile.days_per_week
    );
    out.push_str("- Order every workout with compound movements first, then accessory work.\n");
    out.push_str("- Prescribe 6-7 movements on each training day.\n");

    let mut exclusions = profile.injuries.clone();
    exclusions.extend(profile.medical_conditions.iter().cloned());
    if exclusions.is_empty() {
        out.push_str("- No injuries or medical conditions reported.\n");
    } else {
        let _ = writeln!(
            out,
            "- Work around: {}. Keep each affected slot and put a safer substitution in that item's `notes` instead of omitting it.",
            join_set(&exclusions)
        );
    }

    let _ = writeln!(
        out,
        "- Meals for each day must total {} kcal within 10% ({low:.0}-{high:.0} kcal), with protein, carbs, and fat in grams.",
        profile.calorie_target
    );

    if profile.diet_style.is_empty() {
        out.push_str("- No diet style specified; keep meals balanced.\n");
    } else {
        let _ = writeln!(
            out,
            "- Every meal must follow the {} diet style.",
            profile.diet_style
        );
    }
    let _ = writeln!(
        out,
        "- Never include these allergens: {}.",
        join_set(&profile.allergies)
    );
    let _ = writeln!(out, "- Avoid these foods: {}.", join_set(&profile.dislikes));

    let signals = recovery_signals(profile);
    if signals.is_empty() {
        out.push_str(
            "- Include a `recovery` or `mobility` day only if the weekly load calls for it.\n",
        );
    } else {
        let _ = writeln!(
            out,
            "- Include at least one `recovery` or `mobility` day because {}.",
            signals.join("; ")
        );
    }
}

fn render_user_content(profile: &Profile) -> String {
    let mut out = String::from("Create a weekly training and meal plan for this athlete.\n\n");
    render_profile(&mut out, profile);
    render_rules(&mut out, profile);

    out.push_str("\n## Output schema\nReply with one JSON object of exactly this shape:\n");
    out.push_str(&output_schema());
    out.push('\n');
    out
}
