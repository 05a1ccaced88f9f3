// ABOUTME: Completion response envelope probing across chat, responses, and Gemini shapes
// ABOUTME: Tries known text positions in fixed priority order and returns the first non-empty text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Envelope text extraction
//!
//! Completion backends put the generated text in different places depending
//! on the API mode. Each known position is an [`EnvelopeExtractor`]; they are
//! tried in [`EXTRACTORS`] order and the first non-blank string wins.

use serde_json::Value;

/// Pulls completion text out of one envelope shape
pub type EnvelopeExtractor = fn(&Value) -> Option<String>;

/// Known envelope positions, highest priority first
pub const EXTRACTORS: &[(&str, EnvelopeExtractor)] = &[
    ("output_text", output_text),
    ("responses_output", responses_output),
    ("chat_message", chat_message),
    ("legacy_choice_text", legacy_choice_text),
    ("gemini_candidates", gemini_candidates),
];

/// Extract completion text from a decoded envelope
///
/// Returns `None` when no known position holds non-blank text.
#[must_use]
pub fn extract_text(envelope: &Value) -> Option<String> {
    EXTRACTORS.iter().find_map(|(name, extractor)| {
        extractor(envelope)
            .filter(|text| !text.trim().is_empty())
            .inspect(|_| tracing::debug!(envelope = name, "Completion text located"))
    })
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

/// Concatenate the `text` of every part that has one
fn join_text_parts(parts: &[Value]) -> Option<String> {
    let joined: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    (!joined.trim().is_empty()).then_some(joined)
}

/// Top-level `output_text` convenience field
fn output_text(envelope: &Value) -> Option<String> {
    envelope.get("output_text").and_then(non_empty_str)
}

/// Responses mode: `output[*].content[*].text`
fn responses_output(envelope: &Value) -> Option<String> {
    let items = envelope.get("output")?.as_array()?;
    let parts: Vec<Value> = items
        .iter()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .cloned()
        .collect();
    join_text_parts(&parts)
}

/// Chat mode: `choices[0].message.content`, as a string or an array of parts
fn chat_message(envelope: &Value) -> Option<String> {
    let content = envelope
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?;

    match content {
        Value::String(_) => non_empty_str(content),
        Value::Array(parts) => join_text_parts(parts),
        _ => None,
    }
}

/// Legacy completion mode: `choices[0].text`
fn legacy_choice_text(envelope: &Value) -> Option<String> {
    envelope.get("choices")?.get(0)?.get("text").and_then(non_empty_str)
}

/// Gemini shape: `candidates[0].content.parts[*].text`
fn gemini_candidates(envelope: &Value) -> Option<String> {
    let parts = envelope
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    join_text_parts(parts)
}
