//! Shared error type for the decision flow handlers.

use thiserror::Error;

use crate::domain::decision::DecisionError;
use crate::ports::{AiError, StoreError};

/// Errors surfaced by the flow handlers.
///
/// The two AI variants are kept apart because they carry different retry
/// affordances: a generation failure leaves the session in `Start`, an
/// analysis failure leaves it in `Results` with a "try again".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Domain rejected the operation.
    #[error(transparent)]
    Decision(#[from] DecisionError),

    /// Question generation failed; no session was created.
    #[error("question generation failed: {0}")]
    Generation(AiError),

    /// Analysis failed; the session stays in `Results` for retry.
    #[error("analysis failed: {0}")]
    Analysis(AiError),
}

impl From<StoreError> for FlowError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => FlowError::Decision(DecisionError::not_found(id)),
        }
    }
}

impl FlowError {
    /// Returns true if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FlowError::Generation(e) | FlowError::Analysis(e) => e.is_retryable(),
            FlowError::Decision(_) => false,
        }
    }
}
