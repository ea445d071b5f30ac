//! Domain layer for case-council
//!
//! This crate contains the core entities and value objects of a case review
//! panel. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Case**: the immutable record under review ([`CaseInput`])
//! - **Panel**: a non-voting chair plus specialist seats ([`Participant`]),
//!   the append-only [`Transcript`] and the [`HypothesisBoard`]
//! - **Verdict**: the terminal [`FinalVerdict`] with its optional
//!   [`CriticalFinding`] and [`PrognosisSnapshot`]
//! - **Schema**: declared output shapes and the strict validator used for
//!   schema-constrained generation
//! - **Deliberation**: state machine, [`ProgressEvent`] protocol and
//!   checkpoint values

pub mod case;
pub mod config;
pub mod core;
pub mod deliberation;
pub mod panel;
pub mod prompt;
pub mod schema;
pub mod verdict;

// Re-export commonly used types
pub use case::{Attachment, CaseId, CaseInput, Demographics, FeedbackSignal};
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use deliberation::{
    ChairDirective, DeliberationState, DeliberationTracker, DirectiveKind, HumanReply,
    InitialDifferential, ProgressEvent, RoundStep,
};
pub use panel::{
    EvidenceStrength, Hypothesis, HypothesisBoard, Participant, Transcript, TranscriptEntry,
    extract_evidence_tag,
};
pub use prompt::PanelPrompt;
pub use schema::{Field, Schema, SchemaViolation, StructuredOutput, StructuredOutputError};
pub use verdict::{
    Citation, CriticalFinding, FinalVerdict, MedicationSuggestion, PrognosisSnapshot,
    RecommendedTest, RejectedHypothesis, UrgencyTier,
};
