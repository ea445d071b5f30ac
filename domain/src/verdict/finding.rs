//! Urgent observations surfaced by the terminal report.

use crate::core::string::is_blank;
use crate::schema::{Field, Schema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    /// Act now; threat to life within minutes to hours
    Immediate,
    #[default]
    Urgent,
    /// Needs attention within the current encounter
    Priority,
}

impl UrgencyTier {
    pub const VALUES: [&'static str; 3] = ["immediate", "urgent", "priority"];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyTier::Immediate => "immediate",
            UrgencyTier::Urgent => "urgent",
            UrgencyTier::Priority => "priority",
        }
    }
}

/// An urgent, possibly life-threatening observation
///
/// Providers under schema constraint often fill every member with empty
/// strings instead of omitting the object, so all members are optional and
/// [`CriticalFinding::is_present`] decides whether there is a finding at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalFinding {
    pub finding: String,
    pub implication: String,
    pub urgency: UrgencyTier,
}

impl CriticalFinding {
    pub fn new(finding: impl Into<String>, implication: impl Into<String>, urgency: UrgencyTier) -> Self {
        Self {
            finding: finding.into(),
            implication: implication.into(),
            urgency,
        }
    }

    /// A finding counts only when its `finding` text is non-blank.
    pub fn is_present(&self) -> bool {
        !is_blank(&self.finding)
    }

    pub fn schema() -> Schema {
        Schema::object([
            Field::optional("finding", Schema::String)
                .describe("Empty when nothing urgent was identified"),
            Field::optional("implication", Schema::String),
            Field::optional("urgency", Schema::one_of(&UrgencyTier::VALUES)),
        ])
    }
}
