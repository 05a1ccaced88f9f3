// ABOUTME: Unit tests for prompt construction
// ABOUTME: Validates field embedding, absence markers, domain rules, and determinism
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fixtures::athlete_profile;
use pierre_plan_server::generation::{normalize, prompt};
use pierre_plan_server::llm::prompts::PLAN_SYSTEM_PROMPT;
use serde_json::json;

#[test]
fn test_system_directive_is_fixed() {
    let a = prompt::build(&normalize(&athlete_profile()));
    let b = prompt::build(&normalize(&json!({})));

    assert_eq!(a.system, PLAN_SYSTEM_PROMPT);
    assert_eq!(a.system, b.system);
    assert!(a.system.contains("compound movements first"));
}

#[test]
fn test_every_field_embedded() {
    let pair = prompt::build(&normalize(&athlete_profile()));
    let user = &pair.user;

    for expected in [
        "- Age: 34",
        "- Sex: female",
        "- Height: 168.0 cm",
        "- Weight: 63.5 kg",
        "- Goal: build strength",
        "- Activity level: moderate",
        "- Daily calorie target: 2400 kcal",
        "- Sleep: 7.5 h per night",
        "- Stress level: moderate",
        "- Training days per week: 3",
        "- Diet style: pescatarian",
        "- Equipment access: full gym",
        "- Available equipment: barbell, dumbbells",
        "- Sports: climbing",
        "- Injuries: none",
        "- Medical conditions: none",
        "- Allergies: peanuts",
        "- Food dislikes: olives",
    ] {
        assert!(user.contains(expected), "missing line {expected:?} in:\n{user}");
    }
}

#[test]
fn test_absent_fields_use_markers() {
    let user = prompt::build(&normalize(&json!({}))).user;

    assert!(user.contains("- Age: unspecified"));
    assert!(user.contains("- Height: unspecified"));
    assert!(user.contains("- Diet style: unspecified"));
    assert!(user.contains("- Allergies: none"));
    assert!(user.contains("- Daily calorie target: 2200 kcal"));
    for placeholder in ["undefined", "null", "NaN", ": \n"] {
        assert!(!user.contains(placeholder), "found {placeholder:?}");
    }
}

#[test]
fn test_schema_and_rules_embedded() {
    let user = prompt::build(&normalize(&athlete_profile())).user;

    assert!(user.contains("\"rest_sec\": <integer>"));
    assert!(user.contains("upper|lower|full|recovery|conditioning|hypertrophy|power|mobility"));
    assert!(user.contains("exactly 3 training days"));
    assert!(user.contains("compound movements first"));
    assert!(user.contains("6-7 movements"));
    assert!(user.contains("2400 kcal within 10% (2160-2640 kcal)"));
    assert!(user.contains("follow the pescatarian diet style"));
    assert!(user.contains("Never include these allergens: peanuts."));
    assert!(user.contains("Avoid these foods: olives."));
}

#[test]
fn test_injuries_request_substitution_notes() {
    let user = prompt::build(&normalize(&json!({
        "injuries": ["left knee"],
        "medical_conditions": ["hypertension"]
    })))
    .user;

    assert!(user.contains("Work around: hypertension, left knee."));
    assert!(user.contains("substitution in that item's `notes`"));
}

#[test]
fn test_recovery_rule_signals() {
    let rested = normalize(&json!({ "sleepHours": 8, "stressLevel": "low" }));
    assert!(prompt::recovery_signals(&rested).is_empty());
    assert!(prompt::build(&rested).user.contains("only if the weekly load calls for it"));

    let short_sleep = normalize(&json!({ "sleepHours": 5.5 }));
    let signals = prompt::recovery_signals(&short_sleep);
    assert_eq!(signals.len(), 1);
    assert!(signals[0].contains("5.5 h"));

    let stressed = normalize(&json!({ "stress": "HIGH", "conditions": "asthma" }));
    let signals = prompt::recovery_signals(&stressed);
    assert_eq!(signals.len(), 2);
    assert!(prompt::build(&stressed)
        .user
        .contains("Include at least one `recovery` or `mobility` day because"));
}

#[test]
fn test_rendering_is_deterministic() {
    let a = normalize(&json!({ "sports": ["b", "a"], "equipment": "kettlebell, bands" }));
    let b = normalize(&json!({ "sports": "a,b", "equipment": ["bands", "kettlebell"] }));

    assert_eq!(prompt::build(&a), prompt::build(&b));
}

#[test]
fn test_strict_suffix_appended_once() {
    let base = prompt::build(&normalize(&athlete_profile()));
    let strict = base.with_strict_suffix();

    assert_eq!(strict.system, base.system);
    assert!(strict.user.starts_with(&base.user));
    assert!(strict.user.ends_with(prompt::strict_suffix()));
    assert_eq!(strict.user.matches(prompt::strict_suffix()).count(), 1);
}
