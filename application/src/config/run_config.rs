//! Run configuration - everything a deliberation fixes at start.
//!
//! [`RunConfig`] is enumerated once, validated before the first event, and
//! never changes while the run is in flight.

use council_domain::{DomainError, Participant};
use std::collections::HashSet;
use std::time::Duration;

/// Per-run parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Number of debate rounds (N)
    pub round_count: u32,
    /// Specialist seats, in speaking order
    pub participants: Vec<Participant>,
    /// Transcript entries shown to the prognosis call
    pub prognosis_window: usize,
    /// Extra attempts after a provider failure
    pub max_provider_retries: u32,
    /// Pause between attempts
    pub retry_backoff: Duration,
    /// Ask for web-search grounding on the final report
    pub grounded_synthesis: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            round_count: 3,
            participants: Participant::default_panel(),
            prognosis_window: 6,
            max_provider_retries: 0,
            retry_backoff: Duration::from_millis(500),
            grounded_synthesis: false,
        }
    }
}

impl RunConfig {
    // ==================== Builder Methods ====================

    pub fn with_round_count(mut self, rounds: u32) -> Self {
        self.round_count = rounds;
        self
    }

    pub fn with_participants(mut self, participants: Vec<Participant>) -> Self {
        self.participants = participants;
        self
    }

    pub fn with_prognosis_window(mut self, window: usize) -> Self {
        self.prognosis_window = window;
        self
    }

    pub fn with_max_provider_retries(mut self, retries: u32) -> Self {
        self.max_provider_retries = retries;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn with_grounded_synthesis(mut self, grounded: bool) -> Self {
        self.grounded_synthesis = grounded;
        self
    }

    /// Reject configurations a run cannot start with.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.round_count == 0 {
            return Err(DomainError::InvalidRoundCount);
        }
        if self.participants.is_empty() {
            return Err(DomainError::NoParticipants);
        }
        let mut seen = HashSet::new();
        for participant in &self.participants {
            if !participant.is_specialist() {
                return Err(DomainError::NotASpecialist(participant.display_name()));
            }
            if !seen.insert(participant) {
                return Err(DomainError::DuplicateParticipant(
                    participant.display_name(),
                ));
            }
        }
        Ok(())
    }
}
