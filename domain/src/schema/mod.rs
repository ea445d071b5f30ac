//! Schema model for structured generation.
//!
//! - [`shape::Schema`] - declared value shape and strict validator
//! - [`parsing`] - unwrap + parse + validate pipeline
//! - [`StructuredOutput`] - typed values that declare their own schema

pub mod parsing;
pub mod shape;

pub use parsing::{StructuredOutputError, drop_nulls, parse_structured, unwrap_payload};
pub use shape::{Field, Schema, SchemaViolation};

use serde::de::DeserializeOwned;

/// A type the provider can be asked to produce under schema constraint.
pub trait StructuredOutput: DeserializeOwned {
    /// Shape the provider output must satisfy before deserialization.
    fn schema() -> Schema;

    /// Reset fields that only local code may set (clinician flags,
    /// grounding references). Applied to every provider decode.
    fn clear_local_fields(self) -> Self {
        self
    }

    /// Decode raw provider text into `Self`.
    fn decode(raw: &str) -> Result<Self, StructuredOutputError> {
        let value = parse_structured(raw, &Self::schema())?;
        let decoded: Self = serde_json::from_value(drop_nulls(value))
            .map_err(|e| StructuredOutputError::Malformed(e.to_string()))?;
        Ok(decoded.clear_local_fields())
    }
}
