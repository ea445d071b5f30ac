//! The terminal structured output of a run or a scenario re-analysis.

use super::citation::Citation;
use super::finding::CriticalFinding;
use super::prognosis::PrognosisSnapshot;
use crate::panel::hypothesis::Hypothesis;
use crate::schema::{Field, Schema, StructuredOutput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedHypothesis {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedTest {
    pub test: String,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationSuggestion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caution: Option<String>,
}

/// Final verdict (immutable once produced)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalVerdict {
    pub ranked_hypotheses: Vec<Hypothesis>,
    pub rejected_hypotheses: Vec<RejectedHypothesis>,
    pub recommended_tests: Vec<RecommendedTest>,
    /// Ordered steps, first step first
    pub action_plan: Vec<String>,
    pub medication_suggestions: Vec<MedicationSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_finding: Option<CriticalFinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prognosis: Option<PrognosisSnapshot>,

    // ==================== Extension sections ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consensus_notes: Option<String>,
    /// Filled from grounding metadata, never from the provider payload
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Citation>,
}

impl FinalVerdict {
    /// The critical finding, if one with non-blank text is present.
    pub fn critical_finding(&self) -> Option<&CriticalFinding> {
        self.critical_finding.as_ref().filter(|f| f.is_present())
    }

    /// Drop an empty critical-finding object so consumers never see one.
    pub fn without_blank_finding(mut self) -> Self {
        if self.critical_finding.as_ref().is_some_and(|f| !f.is_present()) {
            self.critical_finding = None;
        }
        self
    }

    pub fn with_references(mut self, references: Vec<Citation>) -> Self {
        self.references = references;
        self
    }

    /// Top-ranked hypothesis, if any.
    pub fn leading_hypothesis(&self) -> Option<&Hypothesis> {
        self.ranked_hypotheses
            .iter()
            .max_by(|a, b| a.probability.total_cmp(&b.probability))
    }
}

impl StructuredOutput for FinalVerdict {
    fn schema() -> Schema {
        Schema::object([
            Field::required("ranked_hypotheses", Schema::array(Hypothesis::schema()))
                .describe("Most likely first"),
            Field::required(
                "rejected_hypotheses",
                Schema::array(Schema::object([
                    Field::required("name", Schema::String),
                    Field::required("reason", Schema::String),
                ])),
            ),
            Field::required(
                "recommended_tests",
                Schema::array(Schema::object([
                    Field::required("test", Schema::String),
                    Field::required("rationale", Schema::String),
                ])),
            ),
            Field::required("action_plan", Schema::array(Schema::String))
                .describe("Ordered next steps"),
            Field::required(
                "medication_suggestions",
                Schema::array(Schema::object([
                    Field::required("name", Schema::String),
                    Field::optional("dose", Schema::String),
                    Field::required("rationale", Schema::String),
                    Field::optional("caution", Schema::String),
                ])),
            ),
            Field::optional("critical_finding", CriticalFinding::schema()),
            Field::optional("prognosis", PrognosisSnapshot::schema()),
            Field::optional("follow_up", Schema::String),
            Field::optional("patient_education", Schema::String),
            Field::optional("consensus_notes", Schema::String),
        ])
    }

    fn clear_local_fields(mut self) -> Self {
        self.references.clear();
        self.ranked_hypotheses = self
            .ranked_hypotheses
            .into_iter()
            .map(Hypothesis::as_provider_claim)
            .collect();
        self
    }
}
