//! Run Deliberation use case
//!
//! Drives one case through the panel:
//!
//! ```text
//! Introducing ─▶ Round(1..=N){ PresentTopic ─▶ [AwaitingInput] ─▶ Specialists ─▶ Prognosis }
//!             ─▶ Synthesizing ─▶ Done | Failed
//! ```
//!
//! All provider calls are issued strictly one after another so the
//! transcript order is deterministic. The run suspends only on provider
//! calls and on the intervention gate.

mod checkpoint;
mod rounds;
mod session;
mod types;

pub use types::{CompletedRun, DeliberationError, RunDeliberationInput};

use crate::ports::generation::GenerationClient;
use crate::ports::intervention::InterventionGate;
use crate::ports::progress::{NoProgress, ProgressSink};
use crate::use_cases::run_registry::RunRegistry;
use crate::use_cases::structured::{RetryPolicy, StructuredGenerator};
use crate::use_cases::synthesize_report::{ReportSynthesizer, SynthesizedReport};
use council_domain::{DeliberationState, ProgressEvent};
use session::RunSession;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for running a panel deliberation
pub struct RunDeliberationUseCase<C: GenerationClient + ?Sized + 'static> {
    generator: StructuredGenerator<C>,
    registry: Option<Arc<RunRegistry>>,
}

impl<C: GenerationClient + ?Sized + 'static> RunDeliberationUseCase<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            generator: StructuredGenerator::new(client),
            registry: None,
        }
    }

    /// Enforce single-flight per case id through a shared registry.
    pub fn with_registry(mut self, registry: Arc<RunRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Execute without progress reporting or a clinician.
    pub async fn execute(
        &self,
        input: &RunDeliberationInput,
    ) -> Result<CompletedRun, DeliberationError> {
        self.execute_with_progress(input, &NoProgress, None).await
    }

    /// Execute with a progress sink and, optionally, an intervention gate.
    ///
    /// Without a gate, a chair question becomes the round topic.
    pub async fn execute_with_progress(
        &self,
        input: &RunDeliberationInput,
        progress: &dyn ProgressSink,
        gate: Option<&mut InterventionGate>,
    ) -> Result<CompletedRun, DeliberationError> {
        input.case.validate()?;
        input.config.validate()?;
        let _guard = match &self.registry {
            Some(registry) => Some(registry.try_acquire(&input.case.case_id)?),
            None => None,
        };

        info!(
            "Starting deliberation for case {} with {} specialists over {} rounds",
            input.case.case_id,
            input.config.participants.len(),
            input.config.round_count
        );

        let retry = RetryPolicy {
            max_retries: input.config.max_provider_retries,
            backoff: input.config.retry_backoff,
        };
        let mut session = RunSession::new(&input.case, &input.config, progress);

        match self.deliberate(&mut session, gate, &retry).await {
            Ok(report) => {
                if let Some(finding) = report.critical_finding() {
                    warn!("Critical finding: {}", finding.finding);
                    session.emit(ProgressEvent::CriticalFinding {
                        finding: finding.clone(),
                    });
                }
                session.emit(ProgressEvent::Verdict {
                    verdict: Box::new(report.verdict),
                });
                info!("Deliberation for case {} complete", input.case.case_id);
                Ok(session.into_completed())
            }
            Err(err) => {
                warn!(
                    "Deliberation for case {} failed: {}",
                    input.case.case_id, err
                );
                session.fail();
                session.emit(ProgressEvent::failed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn deliberate(
        &self,
        session: &mut RunSession<'_>,
        mut gate: Option<&mut InterventionGate>,
        retry: &RetryPolicy,
    ) -> Result<SynthesizedReport, DeliberationError> {
        self.introduce(session);
        self.open_differential(session, retry).await;

        let round_count = session.config.round_count;
        for round in 1..=round_count {
            session.status(format!("Round {} of {}", round, round_count));
            let topic = self
                .present_topic(session, round, gate.as_deref_mut(), retry)
                .await?;
            self.specialist_turns(session, round, &topic, retry).await;
            self.refresh_prognosis(session, round, retry).await?;
            let next = session.after_round(round);
            session.advance(next)?;
        }

        session.status("The chair is drafting the final report");
        let synthesizer = ReportSynthesizer::new(self.generator.clone())
            .grounded(session.config.grounded_synthesis);
        let report = retry
            .run("final report", || {
                synthesizer.synthesize(session.case, &session.transcript, &session.board)
            })
            .await
            .map_err(DeliberationError::Synthesis)?;

        session.advance(DeliberationState::Done)?;
        Ok(report)
    }
}
