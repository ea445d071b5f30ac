//! Console output formatter for finished runs

use colored::Colorize;
use council_application::CompletedRun;
use council_domain::{FinalVerdict, Hypothesis, PrognosisSnapshot, TranscriptEntry};
use serde::Serialize;

/// A what-if re-analysis to print after the main report
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub premise: String,
    pub verdict: FinalVerdict,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    case_id: &'a str,
    verdict: &'a FinalVerdict,
    hypotheses: &'a [Hypothesis],
    transcript: &'a [TranscriptEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    prognosis: Option<&'a PrognosisSnapshot>,
    #[serde(skip_serializing_if = "<[ScenarioOutcome]>::is_empty")]
    scenarios: &'a [ScenarioOutcome],
}

/// Formats deliberation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Transcript recap, differential, prognosis and the final report
    pub fn format_full(
        run: &CompletedRun,
        verdict: &FinalVerdict,
        scenarios: &[ScenarioOutcome],
    ) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Case {}", run.case_id)));
        output.push('\n');

        output.push_str(&Self::section_header("Discussion"));
        for entry in run.transcript.entries() {
            let label = if entry.round == 0 {
                entry.author.display_name()
            } else {
                format!("{} (round {})", entry.author.display_name(), entry.round)
            };
            output.push_str(&format!("\n{}\n{}\n", label.yellow().bold(), entry.content));
        }

        output.push_str(&Self::section_header("Differential at close"));
        output.push_str(&run.hypotheses.render());
        output.push('\n');

        output.push_str(&Self::verdict_body(verdict));
        output.push_str(&Self::scenarios(scenarios));
        output.push_str(&Self::footer());
        output
    }

    /// Only the final report (concise output)
    pub fn format_verdict(
        run: &CompletedRun,
        verdict: &FinalVerdict,
        scenarios: &[ScenarioOutcome],
    ) -> String {
        let mut output = format!(
            "{}\n",
            format!("=== Panel report for case {} ===", run.case_id).cyan().bold()
        );
        output.push_str(&Self::verdict_body(verdict));
        output.push_str(&Self::scenarios(scenarios));
        output
    }

    /// Format as JSON
    pub fn format_json(
        run: &CompletedRun,
        verdict: &FinalVerdict,
        scenarios: &[ScenarioOutcome],
    ) -> String {
        let report = JsonReport {
            case_id: run.case_id.as_str(),
            verdict,
            hypotheses: run.hypotheses.as_slice(),
            transcript: run.transcript.entries(),
            prognosis: run.prognosis.as_ref(),
            scenarios,
        };
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }

    fn verdict_body(verdict: &FinalVerdict) -> String {
        let mut output = String::new();

        if let Some(finding) = verdict.critical_finding() {
            output.push_str(&format!(
                "\n{} {}\n  {}\n",
                format!("CRITICAL ({}):", finding.urgency.as_str()).red().bold(),
                finding.finding.red(),
                finding.implication
            ));
        }

        output.push_str(&Self::section_header("Ranked hypotheses"));
        for (i, h) in verdict.ranked_hypotheses.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} ({:.0}%) - {}\n",
                i + 1,
                h.name.bold(),
                h.probability,
                h.justification
            ));
        }

        if !verdict.rejected_hypotheses.is_empty() {
            output.push_str(&Self::section_header("Rejected"));
            for r in &verdict.rejected_hypotheses {
                output.push_str(&format!("  * {}: {}\n", r.name, r.reason));
            }
        }

        if !verdict.recommended_tests.is_empty() {
            output.push_str(&Self::section_header("Recommended tests"));
            for t in &verdict.recommended_tests {
                output.push_str(&format!("  * {} ({})\n", t.test, t.rationale.dimmed()));
            }
        }

        output.push_str(&Self::section_header("Action plan"));
        for (i, step) in verdict.action_plan.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, step));
        }

        if !verdict.medication_suggestions.is_empty() {
            output.push_str(&Self::section_header("Medication suggestions"));
            for m in &verdict.medication_suggestions {
                let dose = m.dose.as_deref().map(|d| format!(" {}", d)).unwrap_or_default();
                output.push_str(&format!("  * {}{}: {}\n", m.name.bold(), dose, m.rationale));
                if let Some(caution) = &m.caution {
                    output.push_str(&format!("    {} {}\n", "caution:".yellow(), caution));
                }
            }
        }

        if let Some(p) = &verdict.prognosis {
            output.push_str(&Self::section_header("Prognosis"));
            output.push_str(&format!(
                "  short term: {}\n  long term:  {}\n  confidence: {:.0}%\n",
                p.short_term,
                p.long_term,
                p.confidence * 100.0
            ));
        }

        for (title, text) in [
            ("Follow-up", &verdict.follow_up),
            ("Patient education", &verdict.patient_education),
            ("Consensus notes", &verdict.consensus_notes),
        ] {
            if let Some(text) = text {
                output.push_str(&Self::section_header(title));
                output.push_str(&Self::indent(text, "  "));
                output.push('\n');
            }
        }

        if !verdict.references.is_empty() {
            output.push_str(&Self::section_header("References"));
            for c in &verdict.references {
                output.push_str(&format!("  * {} <{}>\n", c.title, c.uri.dimmed()));
            }
        }

        output
    }

    fn scenarios(scenarios: &[ScenarioOutcome]) -> String {
        let mut output = String::new();
        for scenario in scenarios {
            output.push_str(&format!(
                "\n{}\n",
                format!("=== What if: {} ===", scenario.premise).magenta().bold()
            ));
            output.push_str(&Self::verdict_body(&scenario.verdict));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        CaseId, CriticalFinding, DeliberationState, HypothesisBoard, Participant, Transcript,
        UrgencyTier,
    };

    fn verdict(critical: bool) -> FinalVerdict {
        let raw = serde_json::json!({
            "ranked_hypotheses": [
                {"name": "Community-acquired pneumonia", "probability": 70, "justification": "consolidation"}
            ],
            "rejected_hypotheses": [{"name": "Pulmonary embolism", "reason": "Wells score low"}],
            "recommended_tests": [{"test": "Sputum culture", "rationale": "guide antibiotics"}],
            "action_plan": ["Start amoxicillin", "Review in 48 hours"],
            "medication_suggestions": [
                {"name": "Amoxicillin", "dose": "1 g TDS", "rationale": "first line", "caution": "penicillin allergy"}
            ],
            "follow_up": "Chest X-ray in 6 weeks"
        });
        let mut verdict: FinalVerdict = serde_json::from_value(raw).unwrap();
        if critical {
            verdict.critical_finding = Some(CriticalFinding::new(
                "SpO2 84% on air",
                "respiratory failure",
                UrgencyTier::Immediate,
            ));
        }
        verdict
    }

    fn run() -> CompletedRun {
        let mut transcript = Transcript::new();
        transcript.append(TranscriptEntry::introduction(Participant::Chair, "Welcome."));
        transcript.append(TranscriptEntry::specialist(
            Participant::Pulmonology,
            1,
            "Right lower lobe consolidation.",
            None,
        ));
        CompletedRun {
            case_id: CaseId::new("ward-3"),
            state: DeliberationState::Done,
            transcript,
            hypotheses: HypothesisBoard::new(),
            prognosis: None,
        }
    }

    #[test]
    fn test_verdict_output_sections() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_verdict(&run(), &verdict(false), &[]);
        assert!(text.contains("Panel report for case ward-3"));
        assert!(text.contains("1. Community-acquired pneumonia (70%)"));
        assert!(text.contains("Pulmonary embolism: Wells score low"));
        assert!(text.contains("2. Review in 48 hours"));
        assert!(text.contains("Amoxicillin 1 g TDS"));
        assert!(text.contains("caution: penicillin allergy"));
        assert!(text.contains("Chest X-ray in 6 weeks"));
        assert!(!text.contains("CRITICAL"));
        assert!(!text.contains("Discussion"));
    }

    #[test]
    fn test_critical_finding_is_shown_first() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_verdict(&run(), &verdict(true), &[]);
        let critical = text.find("CRITICAL (immediate)").unwrap();
        assert!(critical < text.find("Ranked hypotheses").unwrap());
    }

    #[test]
    fn test_full_output_includes_transcript_and_scenarios() {
        colored::control::set_override(false);
        let scenario = ScenarioOutcome {
            premise: "Procalcitonin is normal".to_string(),
            verdict: verdict(false),
        };
        let text = ConsoleFormatter::format_full(&run(), &verdict(false), &[scenario]);
        assert!(text.contains("Pulmonologist (round 1)"));
        assert!(text.contains("Right lower lobe consolidation."));
        assert!(text.contains("(no hypotheses yet)"));
        assert!(text.contains("=== What if: Procalcitonin is normal ==="));
    }

    #[test]
    fn test_json_output() {
        let text = ConsoleFormatter::format_json(&run(), &verdict(false), &[]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["case_id"], "ward-3");
        assert_eq!(value["verdict"]["action_plan"][0], "Start amoxicillin");
        assert_eq!(value["transcript"].as_array().unwrap().len(), 2);
        assert!(value.get("scenarios").is_none());
        assert!(value.get("prognosis").is_none());
    }
}
