//! Two-stage decoding of structured provider output.
//!
//! 1. [`unwrap_payload`] strips known wrapping artifacts (code fences, prose
//!    around the payload). It never edits the payload itself.
//! 2. [`parse_structured`] parses the unwrapped text and validates it against
//!    a [`Schema`], returning a typed error on the first problem.

use super::shape::{Schema, SchemaViolation};
use serde_json::Value;
use thiserror::Error;

/// Why structured output could not be accepted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructuredOutputError {
    #[error("output is not valid JSON: {0}")]
    Malformed(String),

    #[error(transparent)]
    Violation(#[from] SchemaViolation),
}

/// Strip wrapping artifacts around a structured payload.
///
/// Handles a fence with an optional language tag (` ```json `) and its
/// closing fence, plus explanatory prose before or after the payload. The
/// payload span opens with the delimiter `schema`'s root calls for, so a
/// bracket in leading prose is not mistaken for an object payload.
pub fn unwrap_payload<'a>(raw: &'a str, schema: &Schema) -> &'a str {
    let mut text = raw.trim();

    if let Some(fence) = text.find("```") {
        let rest = &text[fence + 3..];
        // Drop the language tag line, if any
        let body = match rest.find('\n') {
            Some(newline) if rest[..newline].trim().chars().all(char::is_alphanumeric) => {
                &rest[newline + 1..]
            }
            _ => rest,
        };
        text = match body.find("```") {
            Some(close) => &body[..close],
            None => body,
        }
        .trim();
    }

    let (open, close) = match schema {
        Schema::Object(_) => ('{', '}'),
        Schema::Array(_) => ('[', ']'),
        _ => match text.find(['{', '[']).map(|i| &text[i..]) {
            Some(span) if span.starts_with('[') => ('[', ']'),
            _ => ('{', '}'),
        },
    };

    // Outermost span of the expected shape
    if let Some(start) = text.find(open)
        && let Some(end) = text.rfind(close)
        && end > start
    {
        return &text[start..=end];
    }

    text
}

/// Unwrap, parse and validate provider output against `schema`.
pub fn parse_structured(raw: &str, schema: &Schema) -> Result<Value, StructuredOutputError> {
    let payload = unwrap_payload(raw, schema);
    if payload.is_empty() {
        return Err(StructuredOutputError::Malformed("empty output".to_string()));
    }

    let value: Value = serde_json::from_str(payload)
        .map_err(|e| StructuredOutputError::Malformed(e.to_string()))?;

    schema.validate(&value)?;
    Ok(value)
}

/// Remove `null` object members so optional fields read as absent.
pub fn drop_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, drop_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(drop_nulls).collect()),
        other => other,
    }
}
