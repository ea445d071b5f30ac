//! Candidate conclusions under discussion and the board that holds them.

use crate::schema::{Field, Schema};
use serde::{Deserialize, Serialize};

/// How well the evidence supports a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStrength {
    Strong,
    Moderate,
    Weak,
}

impl EvidenceStrength {
    pub const VALUES: [&'static str; 3] = ["strong", "moderate", "weak"];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceStrength::Strong => "strong",
            EvidenceStrength::Moderate => "moderate",
            EvidenceStrength::Weak => "weak",
        }
    }

    pub fn schema() -> Schema {
        Schema::one_of(&Self::VALUES)
    }
}

impl std::str::FromStr for EvidenceStrength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strong" => Ok(EvidenceStrength::Strong),
            "moderate" => Ok(EvidenceStrength::Moderate),
            "weak" => Ok(EvidenceStrength::Weak),
            other => Err(format!("unknown evidence strength: {}", other)),
        }
    }
}

/// A candidate conclusion. `name` is the identity within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub name: String,
    /// Provider-supplied likelihood, 0-100. Never renormalized.
    pub probability: f64,
    pub justification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<EvidenceStrength>,
    #[serde(default)]
    pub human_injected: bool,
}

impl Hypothesis {
    pub fn new(name: impl Into<String>, probability: f64, justification: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            probability,
            justification: justification.into(),
            strength: None,
            human_injected: false,
        }
    }

    pub fn with_strength(mut self, strength: EvidenceStrength) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn injected_by_human(mut self) -> Self {
        self.human_injected = true;
        self
    }

    /// Drop the human flag from a provider-supplied hypothesis.
    pub fn as_provider_claim(mut self) -> Self {
        self.human_injected = false;
        self
    }

    fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Shape expected from the provider for a single hypothesis
    pub fn schema() -> Schema {
        Schema::object([
            Field::required("name", Schema::String),
            Field::required("probability", Schema::number_between(0.0, 100.0))
                .describe("Likelihood from 0 to 100"),
            Field::required("justification", Schema::String),
            Field::optional("strength", EvidenceStrength::schema()),
        ])
    }
}

/// Ordered set of hypotheses keyed by name (case-insensitive).
///
/// Entries are upserted, never removed. Insertion order is kept so the
/// board reads the same way every time it is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HypothesisBoard {
    entries: Vec<Hypothesis>,
}

impl HypothesisBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace by name. Returns `true` when an entry was replaced.
    pub fn upsert(&mut self, hypothesis: Hypothesis) -> bool {
        let key = hypothesis.key();
        match self.entries.iter_mut().find(|h| h.key() == key) {
            Some(existing) => {
                *existing = hypothesis;
                true
            }
            None => {
                self.entries.push(hypothesis);
                false
            }
        }
    }

    pub fn merge(&mut self, hypotheses: impl IntoIterator<Item = Hypothesis>) {
        for hypothesis in hypotheses {
            self.upsert(hypothesis);
        }
    }

    /// Upsert with the human-injected flag forced on.
    pub fn inject(&mut self, hypothesis: Hypothesis) -> bool {
        self.upsert(hypothesis.injected_by_human())
    }

    pub fn get(&self, name: &str) -> Option<&Hypothesis> {
        let key = name.trim().to_lowercase();
        self.entries.iter().find(|h| h.key() == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[Hypothesis] {
        &self.entries
    }

    /// Highest probability first; ties keep insertion order.
    pub fn ranked(&self) -> Vec<&Hypothesis> {
        let mut ranked: Vec<&Hypothesis> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        ranked
    }

    /// Bullet rendering for prompts.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return "(no hypotheses yet)".to_string();
        }
        self.ranked()
            .iter()
            .map(|h| {
                let mut line = format!("- {} ({:.0}%): {}", h.name, h.probability, h.justification);
                if let Some(strength) = h.strength {
                    line.push_str(&format!(" [evidence: {}]", strength.as_str()));
                }
                if h.human_injected {
                    line.push_str(" [added by clinician]");
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split a trailing `Evidence: STRONG|MODERATE|WEAK` line off a reply.
///
/// Markdown emphasis and brackets around the tag are tolerated. When no tag
/// is found the text is returned unchanged.
pub fn extract_evidence_tag(text: &str) -> (String, Option<EvidenceStrength>) {
    let trimmed = text.trim_end();
    let (body, last_line) = match trimmed.rfind('\n') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx + 1..]),
        None => ("", trimmed),
    };

    let cleaned = last_line
        .trim()
        .trim_matches(|c: char| matches!(c, '*' | '_' | '[' | ']' | '(' | ')'))
        .trim();
    let lower = cleaned.to_lowercase();

    let Some(rest) = lower
        .strip_prefix("evidence strength:")
        .or_else(|| lower.strip_prefix("evidence:"))
    else {
        return (text.trim().to_string(), None);
    };

    let value = rest.trim_matches(|c: char| !c.is_alphabetic());
    match value.parse::<EvidenceStrength>() {
        Ok(strength) => (body.trim().to_string(), Some(strength)),
        Err(_) => (text.trim().to_string(), None),
    }
}
