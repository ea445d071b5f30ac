//! Progress reporting for a running deliberation
//!
//! Both reporters write to stderr so that stdout carries only the final
//! report.

use colored::Colorize;
use council_application::ProgressSink;
use council_domain::{Participant, ProgressEvent, TranscriptEntry};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Streams the discussion with a spinner while a participant is speaking
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, message: String) {
        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = slot.take() {
            old.finish_and_clear();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        *slot = Some(pb);
    }

    fn clear_spinner(&self) {
        if let Some(pb) = self
            .spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ProgressReporter {
    fn emit(&self, event: ProgressEvent) {
        match &event {
            ProgressEvent::Turn { participant } => {
                self.start_spinner(format!("{} is speaking...", participant.display_name()));
            }
            ProgressEvent::Status { message } => {
                self.clear_spinner();
                if let Some(text) = render_event(&event) {
                    eprintln!("{}", text);
                }
                self.start_spinner(message.clone());
            }
            _ => {
                self.clear_spinner();
                if let Some(text) = render_event(&event) {
                    eprintln!("{}", text);
                }
            }
        }
    }
}

/// Plain line-per-event progress (no spinner)
pub struct SimpleProgress;

impl ProgressSink for SimpleProgress {
    fn emit(&self, event: ProgressEvent) {
        if let Some(text) = render_event(&event) {
            eprintln!("{}", text);
        }
    }
}

/// Terminal rendering of one event; `None` for events with nothing to show.
pub fn render_event(event: &ProgressEvent) -> Option<String> {
    match event {
        ProgressEvent::Status { message } => Some(format!("{} {}", "->".cyan(), message.bold())),
        ProgressEvent::Turn { .. } => None,
        ProgressEvent::Utterance { entry } => Some(render_entry(entry)),
        ProgressEvent::AwaitingInput { question } => Some(format!(
            "\n{}\n  {}\n",
            "The chair is asking the attending clinician:".yellow().bold(),
            question
        )),
        ProgressEvent::Prognosis { round, snapshot } => Some(format!(
            "\n{}\n  short term: {}\n  long term:  {}\n  confidence: {:.0}%",
            format!("Prognosis after round {}", round).blue().bold(),
            snapshot.short_term,
            snapshot.long_term,
            snapshot.confidence * 100.0
        )),
        ProgressEvent::CriticalFinding { finding } => Some(format!(
            "\n{} {}\n  {}\n",
            format!("CRITICAL ({})", finding.urgency.as_str()).red().bold(),
            finding.finding.red(),
            finding.implication
        )),
        ProgressEvent::Verdict { verdict } => {
            let headline = "Final report ready".green().bold();
            Some(match verdict.leading_hypothesis() {
                Some(leading) => format!(
                    "{} (leading: {}, {:.0}%)",
                    headline, leading.name, leading.probability
                ),
                None => headline.to_string(),
            })
        }
        ProgressEvent::Failed { reason } => Some(format!("{} {}", "Run failed:".red().bold(), reason)),
    }
}

fn render_entry(entry: &TranscriptEntry) -> String {
    let name = entry.author.display_name();
    let header = match &entry.author {
        Participant::Chair => format!("── {} ──", name).cyan().bold(),
        Participant::Human => format!("── {} ──", name).magenta().bold(),
        _ if entry.placeholder => format!("── {} ──", name).dimmed(),
        _ => format!("── {} ──", name).yellow().bold(),
    };

    let body = if entry.placeholder {
        entry.content.dimmed().to_string()
    } else {
        entry.content.clone()
    };

    match entry.evidence {
        Some(strength) => format!(
            "\n{}\n{}\n{}",
            header,
            body,
            format!("[evidence: {}]", strength.as_str()).dimmed()
        ),
        None => format!("\n{}\n{}", header, body),
    }
}
