//! The panel: who speaks, what they said, and what they are considering.

pub mod hypothesis;
pub mod participant;
pub mod transcript;

pub use hypothesis::{EvidenceStrength, Hypothesis, HypothesisBoard, extract_evidence_tag};
pub use participant::Participant;
pub use transcript::{Transcript, TranscriptEntry};
