//! Human checkpoint: suspend on the intervention gate until the clinician
//! answers the chair's question.

use super::RunDeliberationUseCase;
use super::session::RunSession;
use super::types::DeliberationError;
use crate::ports::generation::GenerationClient;
use crate::ports::intervention::InterventionGate;
use council_domain::{DeliberationState, Participant, ProgressEvent, RoundStep, TranscriptEntry};
use tracing::info;

impl<C: GenerationClient + ?Sized + 'static> RunDeliberationUseCase<C> {
    /// Returns the topic for the specialists: the question and its answer.
    pub(super) async fn ask_clinician(
        &self,
        session: &mut RunSession<'_>,
        round: u32,
        question: &str,
        gate: &mut InterventionGate,
    ) -> Result<String, DeliberationError> {
        session.advance(DeliberationState::round(round, RoundStep::AwaitingInput))?;
        session.emit(ProgressEvent::AwaitingInput {
            question: question.to_string(),
        });
        info!("Round {} suspended for clinician input", round);

        let reply = gate
            .wait()
            .await
            .ok_or(DeliberationError::InterventionClosed { round })?;

        info!(
            "Clinician answered with {} hypothesis injections",
            reply.hypotheses.len()
        );
        for hypothesis in reply.hypotheses {
            session.board.inject(hypothesis);
        }
        let answer = reply.text.trim().to_string();
        session.turn(&Participant::Human);
        session.say(TranscriptEntry::human(round, answer.clone()));

        Ok(format!("{}\nThe attending clinician answered: {}", question, answer))
    }
}
