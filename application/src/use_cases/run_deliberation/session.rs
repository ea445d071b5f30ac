//! Mutable state of one run: tracker, transcript, board and the sink.

use super::types::{CompletedRun, DeliberationError};
use crate::config::RunConfig;
use crate::ports::progress::ProgressSink;
use council_domain::{
    CaseInput, DeliberationState, DeliberationTracker, HypothesisBoard, Participant,
    PrognosisSnapshot, ProgressEvent, Transcript, TranscriptEntry,
};
use tracing::debug;

pub(super) struct RunSession<'a> {
    pub(super) case: &'a CaseInput,
    pub(super) config: &'a RunConfig,
    progress: &'a dyn ProgressSink,
    tracker: DeliberationTracker,
    pub(super) transcript: Transcript,
    pub(super) board: HypothesisBoard,
    pub(super) prognosis: Option<PrognosisSnapshot>,
}

impl<'a> RunSession<'a> {
    pub(super) fn new(
        case: &'a CaseInput,
        config: &'a RunConfig,
        progress: &'a dyn ProgressSink,
    ) -> Self {
        Self {
            case,
            config,
            progress,
            tracker: DeliberationTracker::new(config.round_count),
            transcript: Transcript::new(),
            board: HypothesisBoard::new(),
            prognosis: None,
        }
    }

    pub(super) fn emit(&self, event: ProgressEvent) {
        self.progress.emit(event);
    }

    pub(super) fn status(&self, message: impl Into<String>) {
        self.emit(ProgressEvent::status(message));
    }

    /// Announce that `participant` is about to speak.
    pub(super) fn turn(&self, participant: &Participant) {
        self.emit(ProgressEvent::Turn {
            participant: participant.clone(),
        });
    }

    /// Append to the transcript, then publish the entry.
    pub(super) fn say(&mut self, entry: TranscriptEntry) {
        self.transcript.append(entry.clone());
        self.emit(ProgressEvent::Utterance { entry });
    }

    pub(super) fn advance(&mut self, to: DeliberationState) -> Result<(), DeliberationError> {
        debug!("Deliberation {} -> {}", self.tracker.state(), to);
        self.tracker.advance(to).map_err(DeliberationError::State)
    }

    pub(super) fn after_round(&self, round: u32) -> DeliberationState {
        self.tracker.after_round(round)
    }

    /// Mark the run failed. A run already terminal stays as it is.
    pub(super) fn fail(&mut self) {
        if !self.tracker.state().is_terminal() {
            let _ = self.advance(DeliberationState::Failed);
        }
    }

    pub(super) fn into_completed(self) -> CompletedRun {
        CompletedRun {
            case_id: self.case.case_id.clone(),
            state: self.tracker.state(),
            transcript: self.transcript,
            hypotheses: self.board,
            prognosis: self.prognosis,
        }
    }
}
