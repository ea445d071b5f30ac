//! Deliberation state machine: explicit states and legal transition guards.
//!
//! ```text
//! Introducing
//!   -> Round(1).PresentTopic
//! Round(n).PresentTopic -> Round(n).AwaitingInput | Round(n).Specialists
//! Round(n).AwaitingInput -> Round(n).Specialists
//! Round(n).Specialists -> Round(n).Prognosis
//! Round(n).Prognosis -> Round(n+1).PresentTopic   (n < N)
//! Round(N).Prognosis -> Synthesizing
//! Synthesizing -> Done
//! any non-terminal -> Failed
//! ```

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sub-step inside a debate round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStep {
    PresentTopic,
    /// Suspended at the intervention gate
    AwaitingInput,
    Specialists,
    Prognosis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum DeliberationState {
    Introducing,
    Round { number: u32, step: RoundStep },
    Synthesizing,
    Done,
    Failed,
}

impl DeliberationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    pub fn round(number: u32, step: RoundStep) -> Self {
        Self::Round { number, step }
    }
}

impl fmt::Display for DeliberationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Introducing => write!(f, "introducing"),
            Self::Round { number, step } => write!(f, "round {} ({:?})", number, step),
            Self::Synthesizing => write!(f, "synthesizing"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

fn is_legal_transition(from: DeliberationState, to: DeliberationState, round_count: u32) -> bool {
    use DeliberationState::*;
    use RoundStep::*;

    if to == Failed && !from.is_terminal() {
        return true;
    }

    match (from, to) {
        (Introducing, Round { number: 1, step: PresentTopic }) => true,
        (
            Round { number: a, step: PresentTopic },
            Round { number: b, step: AwaitingInput | Specialists },
        ) => a == b,
        (Round { number: a, step: AwaitingInput }, Round { number: b, step: Specialists }) => {
            a == b
        }
        (Round { number: a, step: Specialists }, Round { number: b, step: Prognosis }) => a == b,
        (Round { number: a, step: Prognosis }, Round { number: b, step: PresentTopic }) => {
            b == a + 1 && b <= round_count
        }
        (Round { number, step: Prognosis }, Synthesizing) => number == round_count,
        (Synthesizing, Done) => true,
        _ => false,
    }
}

/// Tracks the current state of one run.
#[derive(Debug, Clone)]
pub struct DeliberationTracker {
    state: DeliberationState,
    round_count: u32,
}

impl DeliberationTracker {
    pub fn new(round_count: u32) -> Self {
        Self {
            state: DeliberationState::Introducing,
            round_count,
        }
    }

    pub fn state(&self) -> DeliberationState {
        self.state
    }

    /// Move to `to` if the transition is legal.
    pub fn advance(&mut self, to: DeliberationState) -> Result<(), DomainError> {
        if !is_legal_transition(self.state, to, self.round_count) {
            return Err(DomainError::IllegalTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }

    /// State after the prognosis step of round `n`.
    pub fn after_round(&self, n: u32) -> DeliberationState {
        if n >= self.round_count {
            DeliberationState::Synthesizing
        } else {
            DeliberationState::round(n + 1, RoundStep::PresentTopic)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DeliberationState::*;
    use RoundStep::*;

    fn walk_round(tracker: &mut DeliberationTracker, n: u32, ask_human: bool) {
        if n == 1 {
            tracker.advance(DeliberationState::round(1, PresentTopic)).unwrap();
        }
        if ask_human {
            tracker.advance(DeliberationState::round(n, AwaitingInput)).unwrap();
        }
        tracker.advance(DeliberationState::round(n, Specialists)).unwrap();
        tracker.advance(DeliberationState::round(n, Prognosis)).unwrap();
        let next = tracker.after_round(n);
        tracker.advance(next).unwrap();
    }

    #[test]
    fn test_full_happy_path() {
        let mut tracker = DeliberationTracker::new(3);
        walk_round(&mut tracker, 1, false);
        walk_round(&mut tracker, 2, true);
        walk_round(&mut tracker, 3, false);
        assert_eq!(tracker.state(), Synthesizing);
        tracker.advance(Done).unwrap();
        assert!(tracker.state().is_terminal());
    }

    #[test]
    fn test_cannot_skip_rounds() {
        let mut tracker = DeliberationTracker::new(3);
        tracker.advance(DeliberationState::round(1, PresentTopic)).unwrap();
        tracker.advance(DeliberationState::round(1, Specialists)).unwrap();
        tracker.advance(DeliberationState::round(1, Prognosis)).unwrap();
        assert!(tracker.advance(Synthesizing).is_err());
        assert!(tracker.advance(DeliberationState::round(3, PresentTopic)).is_err());
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        let mut tracker = DeliberationTracker::new(1);
        tracker.advance(Failed).unwrap();
        assert!(tracker.advance(Failed).is_err());
        assert!(tracker.advance(Introducing).is_err());
    }

    #[test]
    fn test_any_live_state_may_fail() {
        let mut tracker = DeliberationTracker::new(2);
        tracker.advance(DeliberationState::round(1, PresentTopic)).unwrap();
        tracker.advance(DeliberationState::round(1, AwaitingInput)).unwrap();
        tracker.advance(Failed).unwrap();
        assert_eq!(tracker.state(), Failed);
    }

    #[test]
    fn test_single_round_goes_straight_to_synthesis() {
        let mut tracker = DeliberationTracker::new(1);
        walk_round(&mut tracker, 1, false);
        assert_eq!(tracker.state(), Synthesizing);
    }
}
