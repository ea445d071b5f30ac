//! Chair directives between rounds and the human replies they can request.

use crate::panel::hypothesis::Hypothesis;
use crate::schema::{Field, Schema, StructuredOutput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    /// Next discussion topic for the specialists
    Topic,
    /// A question only the human clinician can answer
    Question,
}

/// What the chair decides after summarizing the previous round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChairDirective {
    pub kind: DirectiveKind,
    pub content: String,
    /// Revised estimates for hypotheses already on the board, or new ones
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
}

impl ChairDirective {
    pub fn is_question(&self) -> bool {
        self.kind == DirectiveKind::Question
    }
}

impl StructuredOutput for ChairDirective {
    fn schema() -> Schema {
        Schema::object([
            Field::required("kind", Schema::one_of(&["topic", "question"]))
                .describe("'question' only when missing information blocks progress"),
            Field::required("content", Schema::String),
            Field::optional("hypotheses", Schema::array(Hypothesis::schema())),
        ])
    }

    fn clear_local_fields(mut self) -> Self {
        self.hypotheses = self.hypotheses.into_iter().map(Hypothesis::as_provider_claim).collect();
        self
    }
}

/// Opening differential produced before round 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialDifferential {
    pub hypotheses: Vec<Hypothesis>,
}

impl StructuredOutput for InitialDifferential {
    fn schema() -> Schema {
        Schema::object([Field::required(
            "hypotheses",
            Schema::array(Hypothesis::schema()),
        )])
    }

    fn clear_local_fields(mut self) -> Self {
        self.hypotheses = self.hypotheses.into_iter().map(Hypothesis::as_provider_claim).collect();
        self
    }
}

/// What the human actor deposits at a checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanReply {
    pub text: String,
    /// Hypotheses the clinician wants on the board
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
}

impl HumanReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hypotheses: Vec::new(),
        }
    }

    pub fn with_hypothesis(mut self, hypothesis: Hypothesis) -> Self {
        self.hypotheses.push(hypothesis);
        self
    }
}

impl From<&str> for HumanReply {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for HumanReply {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_question_directive() {
        let raw = r#"{"kind": "question", "content": "Has the patient travelled recently?"}"#;
        let directive = ChairDirective::decode(raw).unwrap();
        assert!(directive.is_question());
        assert!(directive.hypotheses.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_violation() {
        let raw = r#"{"kind": "summary", "content": "x"}"#;
        assert!(ChairDirective::decode(raw).is_err());
    }

    #[test]
    fn test_directive_with_trailing_commentary() {
        let raw = "```json\n{\"kind\":\"topic\",\"content\":\"x\"}\n```\nLet me know if you need more.";
        let directive = ChairDirective::decode(raw).unwrap();
        assert_eq!(directive.content, "x");

        let raw = r#"Per guideline [1], here is the directive: {"kind":"topic","content":"x"}"#;
        assert!(!ChairDirective::decode(raw).unwrap().is_question());
    }

    #[test]
    fn test_provider_cannot_claim_human_injection() {
        let raw = r#"{"kind": "topic", "content": "x", "hypotheses": [
            {"name": "Lupus", "probability": 20, "justification": "rash", "human_injected": true}
        ]}"#;
        let directive = ChairDirective::decode(raw).unwrap();
        assert!(!directive.hypotheses[0].human_injected);

        let raw = r#"{"hypotheses": [{"name": "Lupus", "probability": 20, "justification": "rash", "human_injected": true}]}"#;
        let diff = InitialDifferential::decode(raw).unwrap();
        assert!(!diff.hypotheses[0].human_injected);
    }

    #[test]
    fn test_human_reply_keeps_flag_through_serde() {
        let reply = HumanReply::new("yes").with_hypothesis(Hypothesis::new("Lupus", 20.0, "").injected_by_human());
        let back: HumanReply = serde_json::from_value(serde_json::to_value(&reply).unwrap()).unwrap();
        assert!(back.hypotheses[0].human_injected);
    }

    #[test]
    fn test_decode_differential() {
        let raw = r#"```json
{"hypotheses": [{"name": "Influenza", "probability": 35, "justification": "season"}]}
```"#;
        let diff = InitialDifferential::decode(raw).unwrap();
        assert_eq!(diff.hypotheses[0].name, "Influenza");
    }
}
