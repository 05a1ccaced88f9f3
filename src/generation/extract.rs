// ABOUTME: JSON extractor recovering a structured value from unreliable model text
// ABOUTME: Tries a direct parse, then salvages the outermost brace-delimited span
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::Value;
use thiserror::Error;

/// Model text that could not be turned into JSON
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable model output: {reason}")]
pub struct ParseFailure {
    /// The original text, unchanged
    pub raw: String,
    /// Why the last stage failed
    pub reason: String,
}

/// Extract a JSON value from model text
///
/// Valid JSON is returned as-is. Otherwise the span from the first `{` to
/// the last `}` is parsed, which recovers objects wrapped in prose or
/// markdown fences.
///
/// # Errors
///
/// Returns [`ParseFailure`] carrying the original text when neither stage
/// yields JSON.
pub fn extract(text: &str) -> Result<Value, ParseFailure> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }

    let span = text
        .find('{')
        .zip(text.rfind('}'))
        .filter(|(start, end)| start < end)
        .map(|(start, end)| &text[start..=end]);

    let Some(span) = span else {
        return Err(ParseFailure {
            raw: text.to_owned(),
            reason: "no JSON object delimiters found".to_owned(),
        });
    };

    serde_json::from_str(span).map_err(|e| ParseFailure {
        raw: text.to_owned(),
        reason: e.to_string(),
    })
}
