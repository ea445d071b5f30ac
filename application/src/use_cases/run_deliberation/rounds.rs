//! Introductions and the steps of a debate round.

use super::RunDeliberationUseCase;
use super::session::RunSession;
use super::types::DeliberationError;
use crate::ports::generation::{GenerationClient, GenerationRequest};
use crate::ports::intervention::InterventionGate;
use crate::use_cases::structured::RetryPolicy;
use council_domain::{
    ChairDirective, DeliberationState, DirectiveKind, InitialDifferential, PanelPrompt, Participant,
    PrognosisSnapshot, ProgressEvent, RoundStep, TranscriptEntry, extract_evidence_tag,
};
use tracing::{debug, info, warn};

impl<C: GenerationClient + ?Sized + 'static> RunDeliberationUseCase<C> {
    /// Chair first, then every seat in speaking order. No provider calls.
    pub(super) fn introduce(&self, session: &mut RunSession<'_>) {
        let config = session.config;
        let panel = &config.participants;
        session.status(format!(
            "Convening a panel of {} for case {}",
            panel.len(),
            session.case.case_id
        ));

        session.turn(&Participant::Chair);
        session.say(TranscriptEntry::introduction(
            Participant::Chair,
            PanelPrompt::introduction(&Participant::Chair, panel),
        ));
        for participant in panel {
            session.turn(participant);
            session.say(TranscriptEntry::introduction(
                participant.clone(),
                PanelPrompt::introduction(participant, panel),
            ));
        }
    }

    /// Seed the board before round 1. Failure leaves only the clinician's
    /// own hypotheses on the board.
    pub(super) async fn open_differential(
        &self,
        session: &mut RunSession<'_>,
        retry: &RetryPolicy,
    ) {
        let request = GenerationRequest::new(PanelPrompt::initial_differential(session.case))
            .with_system(PanelPrompt::chair_system());
        let result = retry
            .run("initial differential", || {
                self.generator.structured::<InitialDifferential>(&request)
            })
            .await;

        match result {
            Ok(generated) => {
                info!(
                    "Opening differential has {} hypotheses",
                    generated.value.hypotheses.len()
                );
                session.board.merge(generated.value.hypotheses);
            }
            Err(err) => {
                warn!("Initial differential failed: {}", err);
                session.status("The opening differential could not be produced; starting without one");
            }
        }

        for hypothesis in &session.case.hypotheses {
            session.board.inject(hypothesis.clone());
        }
    }

    /// Put the round's topic on the table and return it.
    pub(super) async fn present_topic(
        &self,
        session: &mut RunSession<'_>,
        round: u32,
        gate: Option<&mut InterventionGate>,
        retry: &RetryPolicy,
    ) -> Result<String, DeliberationError> {
        if round == 1 {
            session.advance(DeliberationState::round(1, RoundStep::PresentTopic))?;
            let topic = PanelPrompt::round_one_topic(session.case, &session.board);
            session.turn(&Participant::Chair);
            session.say(TranscriptEntry::chair(round, topic.clone()));
            session.advance(DeliberationState::round(round, RoundStep::Specialists))?;
            return Ok(topic);
        }

        session.turn(&Participant::Chair);
        let request = GenerationRequest::new(PanelPrompt::chair_directive(
            session.case,
            &session.transcript,
            &session.board,
            round,
            session.config.round_count,
        ))
        .with_system(PanelPrompt::chair_system());
        let directive = retry
            .run("chair directive", || {
                self.generator.structured::<ChairDirective>(&request)
            })
            .await
            .map_err(|source| DeliberationError::TopicDerivation { round, source })?
            .value;

        debug!(
            "Round {} directive: {:?} with {} hypothesis updates",
            round,
            directive.kind,
            directive.hypotheses.len()
        );
        session.board.merge(directive.hypotheses);
        session.say(TranscriptEntry::chair(round, directive.content.clone()));

        let topic = match (directive.kind, gate) {
            (DirectiveKind::Question, Some(gate)) => {
                self.ask_clinician(session, round, &directive.content, gate)
                    .await?
            }
            (DirectiveKind::Question, None) => {
                info!("Round {} question has no clinician to answer it", round);
                session.status(
                    "No clinician is connected; the chair's question becomes the round topic",
                );
                directive.content
            }
            (DirectiveKind::Topic, _) => directive.content,
        };

        session.advance(DeliberationState::round(round, RoundStep::Specialists))?;
        Ok(topic)
    }

    /// Every seat speaks once, in order. A failed turn leaves a placeholder.
    pub(super) async fn specialist_turns(
        &self,
        session: &mut RunSession<'_>,
        round: u32,
        topic: &str,
        retry: &RetryPolicy,
    ) {
        let config = session.config;
        for participant in &config.participants {
            session.turn(participant);
            let request = GenerationRequest::new(PanelPrompt::specialist_turn(
                participant,
                session.case,
                &session.transcript,
                &session.board,
                topic,
            ))
            .with_system(PanelPrompt::specialist_system(participant));

            let entry = match retry
                .run(participant.as_str(), || self.generator.text(&request))
                .await
            {
                Ok(generated) if !generated.value.is_empty() => {
                    let (content, evidence) = extract_evidence_tag(&generated.value);
                    TranscriptEntry::specialist(participant.clone(), round, content, evidence)
                }
                Ok(_) => {
                    warn!("{} returned an empty reply in round {}", participant, round);
                    TranscriptEntry::unavailable(participant.clone(), round)
                }
                Err(err) => {
                    warn!("{} unavailable in round {}: {}", participant, round, err);
                    TranscriptEntry::unavailable(participant.clone(), round)
                }
            };
            session.say(entry);
        }
    }

    /// Replace the rolling prognosis. Failure skips the event.
    pub(super) async fn refresh_prognosis(
        &self,
        session: &mut RunSession<'_>,
        round: u32,
        retry: &RetryPolicy,
    ) -> Result<(), DeliberationError> {
        session.advance(DeliberationState::round(round, RoundStep::Prognosis))?;
        let request = GenerationRequest::new(PanelPrompt::prognosis(
            session.case,
            &session.transcript,
            session.config.prognosis_window,
        ));
        let result = retry
            .run("prognosis", || {
                self.generator.structured::<PrognosisSnapshot>(&request)
            })
            .await;

        match result {
            Ok(generated) => {
                let snapshot = generated.value;
                session.prognosis = Some(snapshot.clone());
                session.emit(ProgressEvent::Prognosis { round, snapshot });
            }
            Err(err) => warn!("Prognosis skipped for round {}: {}", round, err),
        }
        Ok(())
    }
}
