//! Declared value shapes for schema-constrained generation.
//!
//! A [`Schema`] describes the JSON value a provider must return: field
//! presence, primitive types, string enumerations and numeric bounds.
//! [`Schema::validate`] is strict. It never coerces and reports the first
//! mismatch as a [`SchemaViolation`] carrying the offending field path.

use serde_json::{Map, Value, json};
use thiserror::Error;

/// A structurally invalid value where a schema was required.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("schema violation at `{field}`: expected {expected}, got {got}")]
pub struct SchemaViolation {
    /// Dotted / indexed path to the offending value (e.g. `hypotheses[1].name`)
    pub field: String,
    /// What the schema required
    pub expected: String,
    /// What the provider actually returned
    pub got: String,
}

/// Shape of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String,
    Number { min: Option<f64>, max: Option<f64> },
    Boolean,
    /// A string restricted to a fixed set of values
    Enum(Vec<&'static str>),
    Array(Box<Schema>),
    Object(Vec<Field>),
}

/// A named member of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
    pub required: bool,
    pub description: Option<&'static str>,
}

impl Field {
    pub fn required(name: &'static str, schema: Schema) -> Self {
        Self {
            name,
            schema,
            required: true,
            description: None,
        }
    }

    pub fn optional(name: &'static str, schema: Schema) -> Self {
        Self {
            name,
            schema,
            required: false,
            description: None,
        }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

impl Schema {
    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Schema::Object(fields.into_iter().collect())
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }

    pub fn number() -> Self {
        Schema::Number {
            min: None,
            max: None,
        }
    }

    pub fn number_between(min: f64, max: f64) -> Self {
        Schema::Number {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn one_of(values: &[&'static str]) -> Self {
        Schema::Enum(values.to_vec())
    }

    /// Short human-readable name of the expected shape.
    pub fn type_name(&self) -> String {
        match self {
            Schema::String => "string".to_string(),
            Schema::Number { min, max } => match (min, max) {
                (Some(lo), Some(hi)) => format!("number in [{}, {}]", lo, hi),
                (Some(lo), None) => format!("number >= {}", lo),
                (None, Some(hi)) => format!("number <= {}", hi),
                (None, None) => "number".to_string(),
            },
            Schema::Boolean => "boolean".to_string(),
            Schema::Enum(values) => format!("one of [{}]", values.join(", ")),
            Schema::Array(_) => "array".to_string(),
            Schema::Object(_) => "object".to_string(),
        }
    }

    /// Check `value` against this schema.
    ///
    /// Extra object members are ignored. An optional member that is present
    /// but `null` counts as absent; a required member must be present and
    /// non-null.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at("", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), SchemaViolation> {
        let violation = |expected: String| SchemaViolation {
            field: if path.is_empty() {
                "(root)".to_string()
            } else {
                path.to_string()
            },
            expected,
            got: describe(value),
        };

        match self {
            Schema::String => {
                if !value.is_string() {
                    return Err(violation(self.type_name()));
                }
            }
            Schema::Number { min, max } => {
                let Some(n) = value.as_f64() else {
                    return Err(violation(self.type_name()));
                };
                if min.is_some_and(|lo| n < lo) || max.is_some_and(|hi| n > hi) {
                    return Err(violation(self.type_name()));
                }
            }
            Schema::Boolean => {
                if !value.is_boolean() {
                    return Err(violation(self.type_name()));
                }
            }
            Schema::Enum(values) => match value.as_str() {
                Some(s) if values.contains(&s) => {}
                _ => return Err(violation(self.type_name())),
            },
            Schema::Array(items) => {
                let Some(elements) = value.as_array() else {
                    return Err(violation(self.type_name()));
                };
                for (i, element) in elements.iter().enumerate() {
                    items.validate_at(&format!("{}[{}]", path, i), element)?;
                }
            }
            Schema::Object(fields) => {
                let Some(map) = value.as_object() else {
                    return Err(violation(self.type_name()));
                };
                for field in fields {
                    let child_path = if path.is_empty() {
                        field.name.to_string()
                    } else {
                        format!("{}.{}", path, field.name)
                    };
                    match map.get(field.name) {
                        None | Some(Value::Null) if field.required => {
                            return Err(SchemaViolation {
                                field: child_path,
                                expected: field.schema.type_name(),
                                got: "missing".to_string(),
                            });
                        }
                        None | Some(Value::Null) => {}
                        Some(child) => field.schema.validate_at(&child_path, child)?,
                    }
                }
            }
        }
        Ok(())
    }

    /// Provider-neutral JSON Schema rendering.
    pub fn to_json_schema(&self) -> Value {
        match self {
            Schema::String => json!({ "type": "string" }),
            Schema::Number { min, max } => {
                let mut out = Map::new();
                out.insert("type".to_string(), json!("number"));
                if let Some(lo) = min {
                    out.insert("minimum".to_string(), json!(lo));
                }
                if let Some(hi) = max {
                    out.insert("maximum".to_string(), json!(hi));
                }
                Value::Object(out)
            }
            Schema::Boolean => json!({ "type": "boolean" }),
            Schema::Enum(values) => json!({ "type": "string", "enum": values }),
            Schema::Array(items) => json!({ "type": "array", "items": items.to_json_schema() }),
            Schema::Object(fields) => {
                let mut properties = Map::new();
                let mut required = Vec::new();
                for field in fields {
                    let mut prop = field.schema.to_json_schema();
                    if let (Some(desc), Value::Object(map)) = (field.description, &mut prop) {
                        map.insert("description".to_string(), json!(desc));
                    }
                    properties.insert(field.name.to_string(), prop);
                    if field.required {
                        required.push(json!(field.name));
                    }
                }
                json!({
                    "type": "object",
                    "properties": properties,
                    "required": required,
                })
            }
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string \"{}\"", crate::core::string::truncate(s, 40)),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hypothesis_schema() -> Schema {
        Schema::object([
            Field::required("name", Schema::String),
            Field::required("probability", Schema::number_between(0.0, 100.0)),
            Field::optional("strength", Schema::one_of(&["strong", "moderate", "weak"])),
        ])
    }

    #[test]
    fn test_valid_object_passes() {
        let value = json!({"name": "Sepsis", "probability": 40, "strength": "strong"});
        assert!(hypothesis_schema().validate(&value).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let err = hypothesis_schema()
            .validate(&json!({"probability": 10}))
            .unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.got, "missing");
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let err = hypothesis_schema()
            .validate(&json!({"name": null, "probability": 10}))
            .unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_optional_null_is_accepted() {
        let value = json!({"name": "Flu", "probability": 5, "strength": null});
        assert!(hypothesis_schema().validate(&value).is_ok());
    }

    #[test]
    fn test_no_coercion_of_numeric_strings() {
        let err = hypothesis_schema()
            .validate(&json!({"name": "Flu", "probability": "40"}))
            .unwrap_err();
        assert_eq!(err.field, "probability");
        assert!(err.got.starts_with("string"));
    }

    #[test]
    fn test_enum_violation() {
        let err = hypothesis_schema()
            .validate(&json!({"name": "Flu", "probability": 5, "strength": "huge"}))
            .unwrap_err();
        assert_eq!(err.field, "strength");
        assert!(err.expected.contains("moderate"));
    }

    #[test]
    fn test_out_of_range_number() {
        let err = hypothesis_schema()
            .validate(&json!({"name": "Flu", "probability": 140}))
            .unwrap_err();
        assert_eq!(err.field, "probability");
    }

    #[test]
    fn test_nested_array_path() {
        let schema = Schema::object([Field::required(
            "hypotheses",
            Schema::array(hypothesis_schema()),
        )]);
        let value = json!({"hypotheses": [
            {"name": "A", "probability": 10},
            {"name": "B"}
        ]});
        let err = schema.validate(&value).unwrap_err();
        assert_eq!(err.field, "hypotheses[1].probability");
    }

    #[test]
    fn test_root_type_mismatch() {
        let err = hypothesis_schema().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.field, "(root)");
        assert_eq!(err.expected, "object");
    }

    #[test]
    fn test_json_schema_rendering() {
        let rendered = hypothesis_schema().to_json_schema();
        assert_eq!(rendered["type"], "object");
        assert_eq!(rendered["required"], json!(["name", "probability"]));
        assert_eq!(rendered["properties"]["probability"]["maximum"], json!(100.0));
        assert_eq!(
            rendered["properties"]["strength"]["enum"],
            json!(["strong", "moderate", "weak"])
        );
    }
}
