//! The case record under deliberation.

use crate::core::error::DomainError;
use crate::core::string::is_blank;
use crate::panel::hypothesis::Hypothesis;
use crate::panel::participant::Participant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Identity of a case, used for single-flight and log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CaseId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Demographics {
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
}

/// A document or image attached to the case.
///
/// Only the textual rendering (if any) reaches the panel; binary content is
/// described by name and media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Clinician feedback on a hypothesis from an earlier deliberation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSignal {
    Confirmed,
    Refuted,
    Uncertain,
}

impl FeedbackSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackSignal::Confirmed => "confirmed",
            FeedbackSignal::Refuted => "refuted",
            FeedbackSignal::Uncertain => "uncertain",
        }
    }
}

/// The subject record. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseInput {
    pub case_id: CaseId,
    #[serde(default)]
    pub demographics: Demographics,
    pub chief_complaint: String,
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub examination: String,
    #[serde(default)]
    pub labs: String,
    #[serde(default)]
    pub medications: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Participant selection suggested by the case author
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Hypothesis name -> signal from a prior round of review
    #[serde(default)]
    pub feedback: BTreeMap<String, FeedbackSignal>,
    /// Working hypotheses the clinician brings to the panel
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
}

impl CaseInput {
    pub fn new(case_id: impl Into<String>, chief_complaint: impl Into<String>) -> Self {
        Self {
            case_id: CaseId::new(case_id),
            demographics: Demographics::default(),
            chief_complaint: chief_complaint.into(),
            history: String::new(),
            examination: String::new(),
            labs: String::new(),
            medications: String::new(),
            attachments: Vec::new(),
            participants: Vec::new(),
            feedback: BTreeMap::new(),
            hypotheses: Vec::new(),
        }
    }

    pub fn with_demographics(mut self, demographics: Demographics) -> Self {
        self.demographics = demographics;
        self
    }

    pub fn with_history(mut self, history: impl Into<String>) -> Self {
        self.history = history.into();
        self
    }

    pub fn with_examination(mut self, examination: impl Into<String>) -> Self {
        self.examination = examination.into();
        self
    }

    pub fn with_labs(mut self, labs: impl Into<String>) -> Self {
        self.labs = labs.into();
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_feedback(mut self, hypothesis: impl Into<String>, signal: FeedbackSignal) -> Self {
        self.feedback.insert(hypothesis.into(), signal);
        self
    }

    pub fn with_hypothesis(mut self, hypothesis: Hypothesis) -> Self {
        self.hypotheses.push(hypothesis);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if is_blank(self.case_id.as_str()) {
            return Err(DomainError::InvalidCase("case_id is empty".to_string()));
        }
        if is_blank(&self.chief_complaint) {
            return Err(DomainError::InvalidCase(
                "chief_complaint is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Plain-text rendering of the record for prompts.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let d = &self.demographics;

        let mut demo = Vec::new();
        if let Some(age) = d.age {
            demo.push(format!("{} years", age));
        }
        if let Some(sex) = &d.sex {
            demo.push(sex.clone());
        }
        if let Some(w) = d.weight_kg {
            demo.push(format!("{} kg", w));
        }
        if let Some(h) = d.height_cm {
            demo.push(format!("{} cm", h));
        }
        if !demo.is_empty() {
            let _ = writeln!(out, "Patient: {}", demo.join(", "));
        }

        let _ = writeln!(out, "Chief complaint: {}", self.chief_complaint.trim());
        for (label, text) in [
            ("History", &self.history),
            ("Examination", &self.examination),
            ("Labs", &self.labs),
            ("Medications", &self.medications),
        ] {
            if !is_blank(text) {
                let _ = writeln!(out, "{}: {}", label, text.trim());
            }
        }

        for attachment in &self.attachments {
            match &attachment.text {
                Some(text) if !is_blank(text) => {
                    let _ = writeln!(
                        out,
                        "Attachment {} ({}):\n{}",
                        attachment.name,
                        attachment.media_type,
                        text.trim()
                    );
                }
                _ => {
                    let _ = writeln!(
                        out,
                        "Attachment {} ({}), content not transcribed",
                        attachment.name, attachment.media_type
                    );
                }
            }
        }

        if !self.feedback.is_empty() {
            let _ = writeln!(out, "Feedback from prior review:");
            for (name, signal) in &self.feedback {
                let _ = writeln!(out, "  - {}: {}", name, signal.as_str());
            }
        }

        if !self.hypotheses.is_empty() {
            let _ = writeln!(out, "Clinician's working hypotheses:");
            for h in &self.hypotheses {
                let _ = writeln!(out, "  - {} ({:.0}%): {}", h.name, h.probability, h.justification);
            }
        }

        out
    }
}
