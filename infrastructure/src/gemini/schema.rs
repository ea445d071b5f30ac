//! Converts a domain [`Schema`] into the OpenAPI subset accepted as
//! `responseSchema`.
//!
//! - `String` → `STRING`
//! - `Number` → `NUMBER` with `minimum` / `maximum`
//! - `Boolean` → `BOOLEAN`
//! - `Enum` → `STRING` with `format: "enum"` and `enum`
//! - `Array` → `ARRAY` with `items`
//! - `Object` → `OBJECT` with `properties`, `required` and `propertyOrdering`

use council_domain::Schema;
use serde_json::{Map, Value, json};

pub fn to_response_schema(schema: &Schema) -> Value {
    match schema {
        Schema::String => json!({ "type": "STRING" }),
        Schema::Number { min, max } => {
            let mut out = Map::new();
            out.insert("type".to_string(), json!("NUMBER"));
            if let Some(min) = min {
                out.insert("minimum".to_string(), json!(min));
            }
            if let Some(max) = max {
                out.insert("maximum".to_string(), json!(max));
            }
            Value::Object(out)
        }
        Schema::Boolean => json!({ "type": "BOOLEAN" }),
        Schema::Enum(values) => json!({
            "type": "STRING",
            "format": "enum",
            "enum": values,
        }),
        Schema::Array(items) => json!({
            "type": "ARRAY",
            "items": to_response_schema(items),
        }),
        Schema::Object(fields) => {
            let mut properties = Map::new();
            let mut required = Vec::new();
            let mut ordering = Vec::new();

            for field in fields {
                let mut prop = to_response_schema(&field.schema);
                if let (Some(description), Value::Object(map)) = (field.description, &mut prop) {
                    map.insert("description".to_string(), json!(description));
                }
                if !field.required
                    && let Value::Object(map) = &mut prop
                {
                    map.insert("nullable".to_string(), json!(true));
                }
                properties.insert(field.name.to_string(), prop);
                ordering.push(json!(field.name));
                if field.required {
                    required.push(json!(field.name));
                }
            }

            json!({
                "type": "OBJECT",
                "properties": properties,
                "required": required,
                "propertyOrdering": ordering,
            })
        }
    }
}

/// Plain-text rendering of the expected JSON shape, used when the endpoint
/// cannot take `responseSchema` (grounded calls).
pub fn describe_in_prompt(schema: &Schema) -> String {
    let rendered = serde_json::to_string_pretty(&to_response_schema(schema))
        .unwrap_or_else(|_| schema.type_name());
    format!(
        "Answer with a single JSON value and nothing else. It must match this schema:\n{}",
        rendered
    )
}
