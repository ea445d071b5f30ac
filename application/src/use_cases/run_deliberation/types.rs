//! Type definitions for the RunDeliberation use case.

use crate::config::RunConfig;
use crate::use_cases::run_registry::AlreadyRunning;
use crate::use_cases::structured::GenerationError;
use council_domain::{
    CaseId, CaseInput, DeliberationState, DomainError, HypothesisBoard, PrognosisSnapshot,
    Transcript,
};
use thiserror::Error;

/// Fatal deliberation errors.
///
/// Errors raised before the run starts (validation, single-flight) produce no
/// events. Every other variant is also reported to the sink as `Failed`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliberationError {
    #[error("No participants selected for the panel")]
    NoParticipants,

    #[error("Round count must be at least 1")]
    InvalidRoundCount,

    #[error("Invalid input: {0}")]
    InvalidInput(DomainError),

    #[error(transparent)]
    AlreadyRunning(#[from] AlreadyRunning),

    #[error("The chair could not set the topic for round {round}: {source}")]
    TopicDerivation {
        round: u32,
        #[source]
        source: GenerationError,
    },

    #[error("No clinician answer for round {round}: the intervention channel was closed")]
    InterventionClosed { round: u32 },

    #[error("The final report could not be produced: {0}")]
    Synthesis(#[source] GenerationError),

    #[error("Deliberation state error: {0}")]
    State(DomainError),
}

impl From<DomainError> for DeliberationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NoParticipants => DeliberationError::NoParticipants,
            DomainError::InvalidRoundCount => DeliberationError::InvalidRoundCount,
            DomainError::IllegalTransition { .. } => DeliberationError::State(err),
            other => DeliberationError::InvalidInput(other),
        }
    }
}

/// Input for the RunDeliberation use case
#[derive(Debug, Clone)]
pub struct RunDeliberationInput {
    pub case: CaseInput,
    pub config: RunConfig,
}

impl RunDeliberationInput {
    pub fn new(case: CaseInput) -> Self {
        Self {
            case,
            config: RunConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }
}

/// What a finished run leaves behind for re-analysis.
///
/// The verdict itself is only delivered through the `Verdict` event.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedRun {
    pub case_id: CaseId,
    pub state: DeliberationState,
    pub transcript: Transcript,
    pub hypotheses: HypothesisBoard,
    /// Latest snapshot, if any round produced one
    pub prognosis: Option<PrognosisSnapshot>,
}
