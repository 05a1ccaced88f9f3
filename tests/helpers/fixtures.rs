// ABOUTME: Sample profiles and model outputs shared across integration tests
// ABOUTME: Builds valid plan JSON texts in the shapes a completion backend returns

use serde_json::{json, Value};

/// A fairly complete caller profile in camelCase
pub fn athlete_profile() -> Value {
    json!({
        "age": 34,
        "sex": "female",
        "heightCm": 168,
        "weightKg": 63.5,
        "goal": "build strength",
        "activityLevel": "moderate",
        "calorieTarget": 2400,
        "sleepHours": 7.5,
        "stressLevel": "moderate",
        "daysPerWeek": 3,
        "dietStyle": "pescatarian",
        "equipmentAccess": "full gym",
        "equipment": ["barbell", "dumbbells"],
        "sports": ["climbing"],
        "injuries": [],
        "medicalConditions": [],
        "allergies": ["peanuts"],
        "dislikes": ["olives"]
    })
}

/// Valid plan object with `days` days
pub fn plan_value(days: u8) -> Value {
    let week: Vec<Value> = (1..=days)
        .map(|day| {
            json!({
                "day": day,
                "focus": if day % 2 == 0 { "upper" } else { "lower" },
                "workout": [
                    { "exercise": "Back Squat", "sets": 4, "reps": "5", "rest_sec": 150 },
                    { "exercise": "Walking Lunge", "sets": 3, "reps": "10 each", "rest_sec": 60, "notes": "light" }
                ],
                "meals": [
                    {
                        "name": "Salmon Bowl",
                        "kcal": 800,
                        "protein_g": 55,
                        "carbs_g": 80,
                        "fat_g": 25,
                        "ingredients": ["salmon", "rice"],
                        "instructions": ["bake salmon", "serve over rice"]
                    }
                ]
            })
        })
        .collect();
    json!({ "week": week, "notes": "model notes" })
}

/// Valid plan rendered as compact JSON text
pub fn plan_text(days: u8) -> String {
    plan_value(days).to_string()
}

/// Valid plan wrapped in a markdown fence with prose around it
pub fn fenced_plan_text(days: u8) -> String {
    format!(
        "Here is your plan:\n```json\n{}\n```\nLet me know if you need changes.",
        serde_json::to_string_pretty(&plan_value(days)).unwrap()
    )
}

/// Chat completions envelope carrying `content`
pub fn chat_envelope(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    })
}
