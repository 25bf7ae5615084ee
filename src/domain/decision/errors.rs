//! Decision-specific error types.

use thiserror::Error;

use crate::domain::foundation::{SessionId, ValidationError};

use super::deck::SwipeDirection;
use super::session::Phase;

/// Errors from deck and session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// Session was not found (expired or never existed).
    #[error("Session {0} not found")]
    NotFound(SessionId),

    /// A deck must contain at least one card.
    #[error("A deck needs at least one question")]
    EmptyDeck,

    /// Operation is not valid in the session's current phase.
    #[error("Cannot {operation} while session is in the {phase} phase")]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },

    /// Only left/right swipes carry an answer.
    #[error("Swipe direction {0:?} does not map to an answer")]
    UnsupportedDirection(SwipeDirection),

    /// A value failed domain validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DecisionError {
    pub fn not_found(id: SessionId) -> Self {
        DecisionError::NotFound(id)
    }

    pub fn invalid_phase(operation: &'static str, phase: Phase) -> Self {
        DecisionError::InvalidPhase { operation, phase }
    }
}
