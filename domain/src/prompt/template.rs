//! Prompt templates for each stage of a deliberation

use crate::case::input::CaseInput;
use crate::panel::hypothesis::HypothesisBoard;
use crate::panel::participant::Participant;
use crate::panel::transcript::Transcript;

/// Templates for generating prompts at each stage
pub struct PanelPrompt;

impl PanelPrompt {
    /// System prompt shared by every specialist seat
    pub fn specialist_system(participant: &Participant) -> String {
        format!(
            r#"You are a {} sitting on a multidisciplinary case review panel.
You focus on {}.
Speak in the first person, in at most two short paragraphs.
Engage with what colleagues said before you: agree, challenge or refine.
Do not repeat the case back. Do not invent findings that are not in the record.
End your reply with a single line of the form `Evidence: STRONG`, `Evidence: MODERATE` or `Evidence: WEAK`
describing how well the record supports your main point."#,
            participant.display_name(),
            participant.focus()
        )
    }

    /// System prompt for the chair's structured calls
    pub fn chair_system() -> &'static str {
        r#"You chair a multidisciplinary case review panel. You do not vote.
You keep the discussion on the questions that still change management, and you
stop the panel to ask the attending clinician only when a missing piece of
information blocks progress. Always answer with JSON matching the requested schema."#
    }

    /// Local introduction line; no provider call is involved.
    pub fn introduction(participant: &Participant, panel: &[Participant]) -> String {
        match participant {
            Participant::Chair => {
                let seats = panel
                    .iter()
                    .map(|p| p.display_name())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "Welcome. I will chair this review. Today's panel: {}.",
                    seats
                )
            }
            other => format!(
                "{} here. I will be looking at {}.",
                other.display_name(),
                other.focus()
            ),
        }
    }

    pub fn initial_differential(case: &CaseInput) -> String {
        format!(
            r#"Case record:
{}

Produce the opening differential for this case: the hypotheses worth discussing,
each with a probability from 0 to 100, a one-sentence justification and the
strength of supporting evidence. Respect the clinician feedback if any is given:
refuted hypotheses should be low or absent, confirmed ones high."#,
            case.summary()
        )
    }

    /// Chair utterance opening round 1
    pub fn round_one_topic(case: &CaseInput, board: &HypothesisBoard) -> String {
        format!(
            "Let us begin. The case:\n{}\nOpening differential:\n{}\n\nPlease give your initial read.",
            case.summary().trim_end(),
            board.render()
        )
    }

    pub fn chair_directive(
        case: &CaseInput,
        transcript: &Transcript,
        board: &HypothesisBoard,
        round: u32,
        round_count: u32,
    ) -> String {
        format!(
            r#"Case record:
{}

Current differential:
{}

Discussion so far:
{}

You are opening round {} of {}. Summarize where the panel stands in one or two
sentences and set the next topic (kind = "topic"). If, and only if, the panel
cannot progress without information that only the attending clinician has,
ask that clinician one precise question instead (kind = "question").
You may revise probabilities or add hypotheses in `hypotheses`."#,
            case.summary(),
            board.render(),
            transcript.render(),
            round,
            round_count
        )
    }

    pub fn specialist_turn(
        participant: &Participant,
        case: &CaseInput,
        transcript: &Transcript,
        board: &HypothesisBoard,
        topic: &str,
    ) -> String {
        format!(
            r#"Case record:
{}

Current differential:
{}

Discussion so far:
{}

Topic on the table: {}

Give your contribution as the {}."#,
            case.summary(),
            board.render(),
            transcript.render(),
            topic,
            participant.display_name()
        )
    }

    pub fn prognosis(case: &CaseInput, transcript: &Transcript, window: usize) -> String {
        format!(
            r#"Case record:
{}

Most recent discussion:
{}

Estimate the short-term and long-term trajectory, the key factors driving it
and your confidence between 0 and 1."#,
            case.summary(),
            transcript.render_last(window)
        )
    }

    pub fn synthesis(case: &CaseInput, transcript: &Transcript, board: &HypothesisBoard) -> String {
        format!(
            r#"Case record:
{}

Differential as it stands:
{}

Full panel discussion:
{}

Write the panel's final report. Rank the hypotheses that survived, list the ones
the panel rejected with reasons, recommend tests, give an ordered action plan and
medication suggestions. If anything in the record is urgent or potentially
life-threatening, describe it in `critical_finding`; otherwise leave its `finding` empty."#,
            case.summary(),
            board.render(),
            transcript.render()
        )
    }

    pub fn scenario(
        case: &CaseInput,
        transcript: &Transcript,
        board: &HypothesisBoard,
        premise: &str,
    ) -> String {
        format!(
            r#"Case record:
{}

Differential reached by the panel:
{}

Full panel discussion (fixed, do not rewrite it):
{}

Hypothetical: {}

Assume the hypothetical is true. Keep everything the discussion established that
the hypothetical does not touch, and recompute only what would plausibly change.
Return the complete final report in the requested shape."#,
            case.summary(),
            board.render(),
            transcript.render(),
            premise.trim()
        )
    }
}
