//! Progress events streamed to consumers while a run unfolds.
//!
//! Legal order within a run:
//!
//! ```text
//! (Status | Turn | Utterance | AwaitingInput | Prognosis)*  CriticalFinding?  (Verdict | Failed)
//! ```
//!
//! `Verdict` and `Failed` are mutually exclusive end-of-stream markers.

use crate::panel::participant::Participant;
use crate::panel::transcript::TranscriptEntry;
use crate::verdict::finding::CriticalFinding;
use crate::verdict::prognosis::PrognosisSnapshot;
use crate::verdict::report::FinalVerdict;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Informational, any number of times
    Status { message: String },
    /// `participant` is about to produce output
    Turn { participant: Participant },
    /// A completed line of dialogue, already appended to the transcript
    Utterance { entry: TranscriptEntry },
    /// At most once, right before `Verdict`
    CriticalFinding { finding: CriticalFinding },
    /// The run is suspended at the intervention gate
    AwaitingInput { question: String },
    /// At most once per round, after every specialist has spoken
    Prognosis { round: u32, snapshot: PrognosisSnapshot },
    Verdict { verdict: Box<FinalVerdict> },
    Failed { reason: String },
}

impl ProgressEvent {
    pub fn status(message: impl Into<String>) -> Self {
        Self::Status {
            message: message.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Discriminator used in logs and the JSONL event record
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::Turn { .. } => "turn",
            Self::Utterance { .. } => "utterance",
            Self::CriticalFinding { .. } => "critical_finding",
            Self::AwaitingInput { .. } => "awaiting_input",
            Self::Prognosis { .. } => "prognosis",
            Self::Verdict { .. } => "verdict",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verdict { .. } | Self::Failed { .. })
    }
}
