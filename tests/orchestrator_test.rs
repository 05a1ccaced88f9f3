// ABOUTME: Integration tests for the plan generation state machine
// ABOUTME: Drives every credential, attempt-1, and attempt-2 outcome through a scripted client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::fixtures::{athlete_profile, fenced_plan_text, plan_text, plan_value};
use helpers::scripted_client::ScriptedClient;
use pierre_plan_server::generation::{prompt, GenerationSettings, PlanGenerator};
use pierre_plan_server::llm::CompletionFailure;
use pierre_plan_server::models::{FailureReason, Plan, PlanResponse};
use serde_json::json;

const PROSE_1: &str = "Sure! I'd love to help you plan your week.";
const PROSE_2: &str = "Unfortunately I cannot produce JSON right now.";

fn settings() -> GenerationSettings {
    GenerationSettings {
        model: "test-model".to_owned(),
        temperature: 0.8,
        retry_temperature: 0.4,
        timeout: Duration::from_millis(1500),
    }
}

fn generator(client: &Arc<ScriptedClient>) -> PlanGenerator {
    PlanGenerator::new(client.clone(), settings())
}

fn timeout() -> CompletionFailure {
    CompletionFailure::Timeout { timeout_ms: 1500 }
}

fn assert_shape_valid(response: &PlanResponse) {
    response.plan.validate().unwrap();
    let value = serde_json::to_value(response).unwrap();
    let meta = value["meta"].clone();
    let mut plan = value;
    plan.as_object_mut().unwrap().remove("meta");
    Plan::from_value(plan).unwrap();
    assert_eq!(meta["model"], "test-model");
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_missing_credential_serves_fallback_without_calls() {
    let client = Arc::new(ScriptedClient::unconfigured());
    let response = generator(&client)
        .generate_from_value(&json!({ "calorieTarget": 2400 }))
        .await;

    assert_eq!(client.call_count(), 0);
    assert!(response.meta.fallback);
    assert!(!response.meta.retry);
    assert_eq!(response.meta.attempts, 0);
    assert_eq!(response.meta.reason, Some(FailureReason::MissingApiKey));
    assert!(response.meta.raw.is_none());
    assert!((response.plan.total_kcal() - 2400.0).abs() < 1.0);
    assert_shape_valid(&response);
}

#[tokio::test]
async fn test_valid_first_attempt() {
    let client = Arc::new(ScriptedClient::new(vec![Ok(plan_text(3))]));
    let response = generator(&client)
        .generate_from_value(&athlete_profile())
        .await;

    assert_eq!(client.call_count(), 1);
    assert!(!response.meta.retry);
    assert!(!response.meta.fallback);
    assert_eq!(response.meta.attempts, 1);
    assert_eq!(response.meta.reason, None);
    assert_eq!(response.plan, Plan::from_value(plan_value(3)).unwrap());

    let call = &client.calls()[0];
    assert!((call.temperature - 0.8).abs() < f32::EPSILON);
    assert_eq!(call.timeout, Duration::from_millis(1500));
    assert!(!call.prompt.user.contains(prompt::strict_suffix()));
}

#[tokio::test]
async fn test_loosely_typed_numbers_accepted_first_time() {
    let mut drifted = plan_value(2);
    drifted["week"][0]["day"] = json!("1");
    drifted["week"][0]["workout"][0]["reps"] = json!(10);
    drifted["week"][0]["workout"][0]["rest_sec"] = json!(90.0);
    drifted["week"][1]["workout"][1]["sets"] = json!("3");
    let client = Arc::new(ScriptedClient::new(vec![Ok(drifted.to_string())]));

    let response = generator(&client).generate_from_value(&json!({})).await;

    assert_eq!(client.call_count(), 1);
    assert!(!response.meta.fallback);
    let first = &response.plan.week[0].workout[0];
    assert_eq!(first.reps, "10");
    assert_eq!(first.rest_sec, 90);
    assert_eq!(response.plan.week[1].workout[1].sets, 3);
}

#[tokio::test]
async fn test_fenced_first_attempt_is_salvaged() {
    let client = Arc::new(ScriptedClient::new(vec![Ok(fenced_plan_text(2))]));
    let response = generator(&client).generate_from_value(&json!({})).await;

    assert!(!response.meta.fallback);
    assert!(!response.meta.retry);
    assert_eq!(response.plan.week.len(), 2);
}

#[tokio::test]
async fn test_timeout_then_valid_json_retries() {
    let client = Arc::new(ScriptedClient::new(vec![Err(timeout()), Ok(plan_text(4))]));
    let response = generator(&client)
        .generate_from_value(&athlete_profile())
        .await;

    assert!(response.meta.retry);
    assert!(!response.meta.fallback);
    assert_eq!(response.meta.attempts, 2);
    assert_eq!(response.plan.week.len(), 4);

    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert!((calls[1].temperature - 0.4).abs() < f32::EPSILON);
    assert!(calls[1].prompt.user.ends_with(prompt::strict_suffix()));
    assert_eq!(calls[0].prompt.system, calls[1].prompt.system);
}

#[tokio::test]
async fn test_prose_twice_falls_back_with_second_raw() {
    let client = Arc::new(ScriptedClient::new(vec![
        Ok(PROSE_1.to_owned()),
        Ok(PROSE_2.to_owned()),
    ]));
    let response = generator(&client)
        .generate_from_value(&json!({ "calorieTarget": 2000 }))
        .await;

    assert!(response.meta.retry);
    assert!(response.meta.fallback);
    assert_eq!(response.meta.attempts, 2);
    assert_eq!(response.meta.reason, Some(FailureReason::BadJsonOrTimeout));
    assert_eq!(response.meta.raw.as_deref(), Some(PROSE_2));
    assert!((response.plan.total_kcal() - 2000.0).abs() < 1.0);
    assert_shape_valid(&response);
}

#[tokio::test]
async fn test_off_schema_json_counts_as_parse_failure() {
    let off_schema = json!({ "plan": "eat well" }).to_string();
    let bad_day = json!({ "week": [{ "day": 9, "focus": "full", "workout": [], "meals": [] }] })
        .to_string();
    let client = Arc::new(ScriptedClient::new(vec![
        Ok(off_schema),
        Ok(bad_day.clone()),
    ]));
    let response = generator(&client).generate_from_value(&json!({})).await;

    assert!(response.meta.fallback);
    assert_eq!(response.meta.reason, Some(FailureReason::BadJsonOrTimeout));
    assert_eq!(response.meta.raw.as_deref(), Some(bad_day.as_str()));
}

#[tokio::test]
async fn test_backend_error_reason_and_body() {
    let client = Arc::new(ScriptedClient::new(vec![
        Ok(PROSE_1.to_owned()),
        Err(CompletionFailure::Backend {
            status: 503,
            body: "{\"error\":{\"message\":\"overloaded\"}}".to_owned(),
        }),
    ]));
    let response = generator(&client).generate_from_value(&json!({})).await;

    assert_eq!(
        response.meta.reason,
        Some(FailureReason::BackendError { status: 503 })
    );
    assert!(response.meta.raw.unwrap().contains("overloaded"));

    let json = serde_json::to_value(
        &generator(&Arc::new(ScriptedClient::new(vec![
            Err(timeout()),
            Err(CompletionFailure::Backend {
                status: 429,
                body: String::new(),
            }),
        ])))
        .generate_from_value(&json!({}))
        .await,
    )
    .unwrap();
    assert_eq!(json["meta"]["reason"], "backend_error_429");
}

#[tokio::test]
async fn test_first_raw_used_when_second_has_none() {
    let client = Arc::new(ScriptedClient::new(vec![
        Ok(PROSE_1.to_owned()),
        Err(timeout()),
    ]));
    let response = generator(&client).generate_from_value(&json!({})).await;

    assert_eq!(response.meta.reason, Some(FailureReason::BadJsonOrTimeout));
    assert_eq!(response.meta.raw.as_deref(), Some(PROSE_1));
}

#[tokio::test]
async fn test_transport_failure_maps_to_exception() {
    let client = Arc::new(ScriptedClient::new(vec![
        Err(CompletionFailure::Transport("connection refused".to_owned())),
        Err(CompletionFailure::Transport("connection refused".to_owned())),
    ]));
    let response = generator(&client).generate_from_value(&json!({})).await;

    assert_eq!(response.meta.reason, Some(FailureReason::Exception));
    assert!(response.meta.raw.is_none());
    assert_eq!(client.call_count(), 2);
}

// ============================================================================
// Totality
// ============================================================================

fn outcome(kind: usize) -> Result<String, CompletionFailure> {
    match kind {
        0 => Ok(plan_text(2)),
        1 => Ok(fenced_plan_text(1)),
        2 => Ok(PROSE_1.to_owned()),
        3 => Ok("{\"week\": []}".to_owned()),
        4 => Err(timeout()),
        5 => Err(CompletionFailure::EmptyResponse),
        6 => Err(CompletionFailure::Backend {
            status: 500,
            body: "boom".to_owned(),
        }),
        7 => Err(CompletionFailure::Transport("reset".to_owned())),
        _ => Err(CompletionFailure::AuthMissing),
    }
}

const OUTCOME_KINDS: usize = 9;

fn is_success(kind: usize) -> bool {
    kind <= 1
}

#[tokio::test]
async fn test_every_outcome_combination_yields_valid_plan() {
    for first in 0..OUTCOME_KINDS {
        for second in 0..OUTCOME_KINDS {
            let client = Arc::new(ScriptedClient::new(vec![outcome(first), outcome(second)]));
            let response = generator(&client)
                .generate_from_value(&athlete_profile())
                .await;

            assert_shape_valid(&response);

            let expected_calls = if is_success(first) { 1 } else { 2 };
            assert_eq!(client.call_count(), expected_calls, "{first}/{second}");
            assert_eq!(response.meta.retry, !is_success(first), "{first}/{second}");

            let degraded = !is_success(first) && !is_success(second);
            assert_eq!(response.meta.fallback, degraded, "{first}/{second}");
            assert_eq!(response.meta.reason.is_some(), degraded, "{first}/{second}");
        }
    }
}

#[tokio::test]
async fn test_requests_get_distinct_ids() {
    let client = Arc::new(ScriptedClient::unconfigured());
    let generator = generator(&client);

    let a = generator.generate_from_value(&json!({})).await;
    let b = generator.generate_from_value(&json!({})).await;
    assert_ne!(a.meta.request_id, b.meta.request_id);
}
