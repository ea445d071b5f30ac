//! Scripted generation client shared by the use case tests.

use crate::ports::generation::{GenerationClient, GenerationRequest, ProviderError, RawGeneration};
use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Which kind of call a request is, recognised from its prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Stage {
    Differential,
    Directive,
    Specialist,
    Prognosis,
    Synthesis,
    Scenario,
}

impl Stage {
    fn of(request: &GenerationRequest) -> Stage {
        let prompt = request.prompt.as_str();
        if request.schema.is_none() {
            Stage::Specialist
        } else if prompt.contains("Produce the opening differential") {
            Stage::Differential
        } else if prompt.contains("You are opening round") {
            Stage::Directive
        } else if prompt.contains("Estimate the short-term") {
            Stage::Prognosis
        } else if prompt.contains("Hypothetical:") {
            Stage::Scenario
        } else {
            Stage::Synthesis
        }
    }

    fn fallback(self) -> RawGeneration {
        let text = match self {
            Stage::Differential => json!({
                "hypotheses": [{
                    "name": "Community-acquired pneumonia",
                    "probability": 55,
                    "justification": "fever, cough and focal crackles",
                    "strength": "moderate"
                }]
            })
            .to_string(),
            Stage::Directive => json!({"kind": "topic", "content": "Focus on the imaging."}).to_string(),
            Stage::Specialist => "The picture fits a lobar process.\nEvidence: MODERATE".to_string(),
            Stage::Prognosis => json!({
                "short_term": "Improving on antibiotics",
                "long_term": "Full recovery expected",
                "key_factors": ["age", "oxygen requirement"],
                "confidence": 0.6
            })
            .to_string(),
            Stage::Synthesis | Stage::Scenario => verdict_json(None),
        };
        RawGeneration::text(text)
    }
}

/// A valid verdict payload, optionally with a critical finding.
pub(crate) fn verdict_json(critical: Option<&str>) -> String {
    let mut verdict = json!({
        "ranked_hypotheses": [
            {"name": "Community-acquired pneumonia", "probability": 70, "justification": "consolidation"},
            {"name": "Pulmonary embolism", "probability": 10, "justification": "tachycardia"}
        ],
        "rejected_hypotheses": [{"name": "Heart failure", "reason": "normal BNP"}],
        "recommended_tests": [{"test": "Sputum culture", "rationale": "guide therapy"}],
        "action_plan": ["Start antibiotics", "Repeat chest X-ray in 6 weeks"],
        "medication_suggestions": [{"name": "Amoxicillin", "dose": "1 g TID", "rationale": "first line"}]
    });
    if let Some(finding) = critical {
        verdict["critical_finding"] = json!({
            "finding": finding,
            "implication": "needs action now",
            "urgency": "immediate"
        });
    }
    verdict.to_string()
}

/// Replays scripted responses per stage, then falls back to valid defaults.
pub(crate) struct ScriptedClient {
    scripts: Mutex<HashMap<Stage, VecDeque<Result<RawGeneration, ProviderError>>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedClient {
    pub(crate) fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn script(&self, stage: Stage, responses: Vec<Result<RawGeneration, ProviderError>>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(stage)
            .or_default()
            .extend(responses);
    }

    pub(crate) fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self, stage: Stage) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| Stage::of(r) == stage)
            .count()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<RawGeneration, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        let stage = Stage::of(request);
        self.scripts
            .lock()
            .unwrap()
            .get_mut(&stage)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(stage.fallback()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
