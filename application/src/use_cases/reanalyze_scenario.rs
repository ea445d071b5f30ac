//! Scenario re-analysis
//!
//! Branches off a completed deliberation: the transcript and hypotheses are
//! read, never written, so the same run can be re-analyzed any number of
//! times under different premises.

use super::run_deliberation::CompletedRun;
use super::structured::{GenerationError, StructuredGenerator};
use crate::ports::generation::{GenerationClient, GenerationRequest};
use council_domain::{
    CaseInput, FinalVerdict, HypothesisBoard, PanelPrompt, Transcript, core::string::is_blank,
};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReanalysisError {
    #[error("Scenario premise cannot be empty")]
    EmptyPremise,

    #[error("Scenario re-analysis failed: {0}")]
    Generation(#[from] GenerationError),
}

pub struct ScenarioReanalyzer<C: GenerationClient + ?Sized> {
    generator: StructuredGenerator<C>,
}

impl<C: GenerationClient + ?Sized> ScenarioReanalyzer<C> {
    pub fn new(generator: StructuredGenerator<C>) -> Self {
        Self { generator }
    }

    /// Alternate verdict assuming `premise` holds.
    pub async fn reanalyze(
        &self,
        case: &CaseInput,
        transcript: &Transcript,
        board: &HypothesisBoard,
        premise: &str,
    ) -> Result<FinalVerdict, ReanalysisError> {
        if is_blank(premise) {
            return Err(ReanalysisError::EmptyPremise);
        }
        info!("Re-analyzing case {} under premise: {}", case.case_id, premise.trim());

        let request =
            GenerationRequest::new(PanelPrompt::scenario(case, transcript, board, premise))
                .with_system(PanelPrompt::chair_system());
        let generated = self.generator.structured::<FinalVerdict>(&request).await?;
        Ok(generated.value.without_blank_finding())
    }

    /// Convenience over [`Self::reanalyze`] for a finished run.
    pub async fn reanalyze_run(
        &self,
        case: &CaseInput,
        run: &CompletedRun,
        premise: &str,
    ) -> Result<FinalVerdict, ReanalysisError> {
        self.reanalyze(case, &run.transcript, &run.hypotheses, premise)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedClient, Stage};
    use crate::ports::generation::RawGeneration;
    use council_domain::{Hypothesis, Participant, TranscriptEntry};
    use std::sync::Arc;

    fn fixture() -> (CaseInput, Transcript, HypothesisBoard) {
        let case = CaseInput::new("c-9", "Fever after travel");
        let mut transcript = Transcript::new();
        transcript.append(TranscriptEntry::chair(1, "Consider malaria"));
        transcript.append(TranscriptEntry::specialist(
            Participant::InfectiousDisease,
            1,
            "Thick and thin smears today.",
            None,
        ));
        let mut board = HypothesisBoard::new();
        board.upsert(Hypothesis::new("Malaria", 60.0, "travel to endemic area"));
        (case, transcript, board)
    }

    #[tokio::test]
    async fn test_reanalysis_never_mutates_source() {
        let (case, transcript, board) = fixture();
        let transcript_before = transcript.clone();
        let board_before = board.clone();

        let client = Arc::new(ScriptedClient::new());
        let reanalyzer = ScenarioReanalyzer::new(StructuredGenerator::new(client.clone()));
        for premise in ["Smear is negative", "Platelets fall to 40"] {
            let verdict = reanalyzer
                .reanalyze(&case, &transcript, &board, premise)
                .await
                .unwrap();
            assert!(!verdict.ranked_hypotheses.is_empty());
        }

        assert_eq!(transcript, transcript_before);
        assert_eq!(board, board_before);
        assert_eq!(client.calls(Stage::Scenario), 2);
        assert!(client.requests()[1].prompt.contains("Platelets fall to 40"));
    }

    #[tokio::test]
    async fn test_blank_premise_makes_no_call() {
        let (case, transcript, board) = fixture();
        let client = Arc::new(ScriptedClient::new());
        let reanalyzer = ScenarioReanalyzer::new(StructuredGenerator::new(client.clone()));
        assert_eq!(
            reanalyzer.reanalyze(&case, &transcript, &board, "   ").await,
            Err(ReanalysisError::EmptyPremise)
        );
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_output_is_an_error() {
        let (case, transcript, board) = fixture();
        let client = Arc::new(ScriptedClient::new());
        client.script(
            Stage::Scenario,
            vec![Ok(RawGeneration::text(r#"{"ranked_hypotheses": []}"#))],
        );
        let result = ScenarioReanalyzer::new(StructuredGenerator::new(client))
            .reanalyze(&case, &transcript, &board, "CT shows abscess")
            .await;
        assert!(matches!(
            result,
            Err(ReanalysisError::Generation(GenerationError::SchemaViolation(_)))
        ));
    }
}
