//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid case: {0}")]
    InvalidCase(String),

    #[error("No participants selected for the panel")]
    NoParticipants,

    #[error("Participant {0} selected more than once")]
    DuplicateParticipant(String),

    #[error("{0} cannot take a specialist seat")]
    NotASpecialist(String),

    #[error("Round count must be at least 1")]
    InvalidRoundCount,

    #[error("Scenario premise cannot be empty")]
    EmptyPremise,

    #[error("Illegal deliberation transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::NoParticipants.to_string(),
            "No participants selected for the panel"
        );
        let err = DomainError::IllegalTransition {
            from: "done".to_string(),
            to: "round 2".to_string(),
        };
        assert_eq!(err.to_string(), "Illegal deliberation transition: done -> round 2");
    }
}
