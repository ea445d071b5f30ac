//! Rolling trajectory estimate refreshed after each round.

use crate::schema::{Field, Schema, StructuredOutput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrognosisSnapshot {
    pub short_term: String,
    pub long_term: String,
    pub key_factors: Vec<String>,
    /// 0.0 - 1.0
    pub confidence: f64,
}

impl StructuredOutput for PrognosisSnapshot {
    fn schema() -> Schema {
        Schema::object([
            Field::required("short_term", Schema::String)
                .describe("Expected course over the next days"),
            Field::required("long_term", Schema::String)
                .describe("Expected course over months to years"),
            Field::required("key_factors", Schema::array(Schema::String)),
            Field::required("confidence", Schema::number_between(0.0, 1.0)),
        ])
    }
}
