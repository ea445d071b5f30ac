//! The append-only record of what was said, in order.

use super::hypothesis::EvidenceStrength;
use super::participant::Participant;
use serde::{Deserialize, Serialize};

/// One utterance in the deliberation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub author: Participant,
    pub content: String,
    /// Round the entry belongs to; 0 for introductions
    pub round: u32,
    /// Stand-in for a turn that could not be produced
    #[serde(default)]
    pub placeholder: bool,
    #[serde(default)]
    pub human_intervention: bool,
    #[serde(default)]
    pub chair_message: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<EvidenceStrength>,
}

impl TranscriptEntry {
    fn base(author: Participant, round: u32, content: impl Into<String>) -> Self {
        Self {
            author,
            content: content.into(),
            round,
            placeholder: false,
            human_intervention: false,
            chair_message: false,
            evidence: None,
        }
    }

    pub fn chair(round: u32, content: impl Into<String>) -> Self {
        Self {
            chair_message: true,
            ..Self::base(Participant::Chair, round, content)
        }
    }

    pub fn introduction(author: Participant, content: impl Into<String>) -> Self {
        let chair_message = author == Participant::Chair;
        Self {
            chair_message,
            ..Self::base(author, 0, content)
        }
    }

    pub fn specialist(
        author: Participant,
        round: u32,
        content: impl Into<String>,
        evidence: Option<EvidenceStrength>,
    ) -> Self {
        Self {
            evidence,
            ..Self::base(author, round, content)
        }
    }

    /// Stand-in for a specialist whose turn failed
    pub fn unavailable(author: Participant, round: u32) -> Self {
        let content = format!(
            "{} is unavailable for this round.",
            author.display_name()
        );
        Self {
            placeholder: true,
            ..Self::base(author, round, content)
        }
    }

    pub fn human(round: u32, content: impl Into<String>) -> Self {
        Self {
            human_intervention: true,
            ..Self::base(Participant::Human, round, content)
        }
    }

    /// `Name: content` line used in prompts
    pub fn render(&self) -> String {
        format!("{}: {}", self.author.display_name(), self.content.trim())
    }
}

/// Ordered, append-only list of entries.
///
/// Entries cannot be removed, reordered or edited once appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its position.
    pub fn append(&mut self, entry: TranscriptEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `n` entries (fewer if the transcript is shorter).
    pub fn last(&self, n: usize) -> &[TranscriptEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Entries spoken in a given round
    pub fn round(&self, round: u32) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter().filter(move |e| e.round == round)
    }

    pub fn render(&self) -> String {
        render_entries(&self.entries)
    }

    pub fn render_last(&self, n: usize) -> String {
        render_entries(self.last(n))
    }
}

fn render_entries(entries: &[TranscriptEntry]) -> String {
    if entries.is_empty() {
        return "(nothing said yet)".to_string();
    }
    entries
        .iter()
        .map(TranscriptEntry::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}
