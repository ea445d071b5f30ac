//! Intervention gate: single-capacity handoff between the clinician and a run.
//!
//! ```text
//! run ── AwaitingInput(question) ──▶ sink ──▶ clinician
//!  ▲                                              │
//!  └──── InterventionGate::wait ◀── answer() ─────┘
//! ```
//!
//! One gate is created per run and owned by it. The responder half can be
//! cloned and handed to whatever collects the answer (stdin reader, UI).

use council_domain::HumanReply;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterventionError {
    #[error("An answer is already waiting to be consumed")]
    AnswerPending,

    #[error("The run is no longer accepting answers")]
    Closed,
}

/// Create a connected gate/responder pair.
pub fn intervention_channel() -> (InterventionGate, InterventionResponder) {
    let (tx, rx) = mpsc::channel(1);
    (InterventionGate { rx }, InterventionResponder { tx })
}

/// Run-side half. Awaiting it suspends the run until an answer arrives.
#[derive(Debug)]
pub struct InterventionGate {
    rx: mpsc::Receiver<HumanReply>,
}

impl InterventionGate {
    /// Wait for the next answer and clear the slot.
    ///
    /// Returns `None` once every responder has been dropped and no answer is
    /// left in the slot.
    pub async fn wait(&mut self) -> Option<HumanReply> {
        self.rx.recv().await
    }
}

/// Actor-side half.
#[derive(Debug, Clone)]
pub struct InterventionResponder {
    tx: mpsc::Sender<HumanReply>,
}

impl InterventionResponder {
    /// Deposit one answer. Fails if the previous one has not been consumed.
    pub fn answer(&self, reply: impl Into<HumanReply>) -> Result<(), InterventionError> {
        self.tx.try_send(reply.into()).map_err(|e| match e {
            TrySendError::Full(_) => InterventionError::AnswerPending,
            TrySendError::Closed(_) => InterventionError::Closed,
        })
    }

    /// `true` once the run has finished with its gate
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::Hypothesis;
    use std::time::Duration;

    #[tokio::test]
    async fn test_answer_then_wait_consumes_slot() {
        let (mut gate, responder) = intervention_channel();
        responder.answer("No recent travel").unwrap();
        let reply = gate.wait().await.unwrap();
        assert_eq!(reply.text, "No recent travel");

        // Slot is clear again
        responder.answer("second").unwrap();
        assert_eq!(gate.wait().await.unwrap().text, "second");
    }

    #[tokio::test]
    async fn test_second_deposit_is_rejected_while_pending() {
        let (_gate, responder) = intervention_channel();
        responder.answer("first").unwrap();
        assert_eq!(
            responder.answer("second"),
            Err(InterventionError::AnswerPending)
        );
    }

    #[tokio::test]
    async fn test_wait_resumes_when_answer_arrives_later() {
        let (mut gate, responder) = intervention_channel();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            responder
                .answer(HumanReply::new("Biopsy pending").with_hypothesis(Hypothesis::new(
                    "Lymphoma",
                    30.0,
                    "night sweats",
                )))
                .unwrap();
        });
        let reply = gate.wait().await.unwrap();
        assert_eq!(reply.hypotheses.len(), 1);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_responders_close_the_gate() {
        let (mut gate, responder) = intervention_channel();
        let clone = responder.clone();
        drop(responder);
        drop(clone);
        assert!(gate.wait().await.is_none());
    }

    #[tokio::test]
    async fn test_answer_after_gate_dropped_is_closed() {
        let (gate, responder) = intervention_channel();
        drop(gate);
        assert!(responder.is_closed());
        assert_eq!(responder.answer("late"), Err(InterventionError::Closed));
    }
}
