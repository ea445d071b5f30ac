//! Report synthesizer
//!
//! One terminal schema-constrained call turning the whole discussion into a
//! [`FinalVerdict`]. The only post-processing is the critical-finding check.

use super::structured::{GenerationError, StructuredGenerator};
use crate::ports::generation::{GenerationClient, GenerationRequest};
use council_domain::{
    CaseInput, CriticalFinding, FinalVerdict, HypothesisBoard, PanelPrompt, Transcript,
};
use tracing::{debug, info};

/// A verdict plus its critical finding, when one is present.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedReport {
    pub verdict: FinalVerdict,
}

impl SynthesizedReport {
    pub fn critical_finding(&self) -> Option<&CriticalFinding> {
        self.verdict.critical_finding()
    }
}

pub struct ReportSynthesizer<C: GenerationClient + ?Sized> {
    generator: StructuredGenerator<C>,
    grounded: bool,
}

impl<C: GenerationClient + ?Sized> ReportSynthesizer<C> {
    pub fn new(generator: StructuredGenerator<C>) -> Self {
        Self {
            generator,
            grounded: false,
        }
    }

    /// Ground the report in web sources; citations become its references.
    pub fn grounded(mut self, grounded: bool) -> Self {
        self.grounded = grounded;
        self
    }

    pub async fn synthesize(
        &self,
        case: &CaseInput,
        transcript: &Transcript,
        board: &HypothesisBoard,
    ) -> Result<SynthesizedReport, GenerationError> {
        info!(
            "Synthesizing final report from {} transcript entries",
            transcript.len()
        );
        let request = GenerationRequest::new(PanelPrompt::synthesis(case, transcript, board))
            .with_system(PanelPrompt::chair_system())
            .grounded(self.grounded);

        let generated = self.generator.structured::<FinalVerdict>(&request).await?;
        let mut verdict = generated.value.without_blank_finding();
        if self.grounded {
            debug!("Report cites {} sources", generated.citations.len());
            verdict = verdict.with_references(generated.citations);
        }
        Ok(SynthesizedReport { verdict })
    }
}
