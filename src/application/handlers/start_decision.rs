//! StartDecisionHandler - generates a deck and opens a session.

use std::sync::Arc;

use crate::domain::decision::{DecisionError, DecisionSession};
use crate::domain::foundation::{QuestionCount, SessionId, ValidationError};
use crate::ports::{QuestionGenerator, SessionStore};

use super::FlowError;

/// Command to start a new decision flow.
#[derive(Debug, Clone)]
pub struct StartDecisionCommand {
    /// The decision the user wants help with.
    pub prompt: String,
    /// Requested deck size; `None` uses the default of 10.
    pub count: Option<u8>,
}

/// Handler for starting decisions.
pub struct StartDecisionHandler {
    generator: Arc<dyn QuestionGenerator>,
    store: Arc<dyn SessionStore>,
}

impl StartDecisionHandler {
    pub fn new(generator: Arc<dyn QuestionGenerator>, store: Arc<dyn SessionStore>) -> Self {
        Self { generator, store }
    }

    /// Generates the deck, then creates a session already in `Swipe`.
    ///
    /// Generation must fully succeed before any session exists; a failure
    /// is surfaced as a retryable error and nothing is retained.
    pub async fn handle(&self, cmd: StartDecisionCommand) -> Result<DecisionSession, FlowError> {
        // Reject a blank prompt up front; no model call is spent on it.
        if cmd.prompt.trim().is_empty() {
            return Err(DecisionError::from(ValidationError::empty_field("prompt")).into());
        }

        let count = cmd.count.map(QuestionCount::new).unwrap_or_default();

        let questions = self
            .generator
            .generate(&cmd.prompt, count)
            .await
            .map_err(FlowError::Generation)?;

        let mut session = DecisionSession::new(SessionId::new());
        session.begin(cmd.prompt, questions)?;

        tracing::info!(
            session_id = %session.id(),
            cards = count.value(),
            "decision flow started"
        );

        let handle = self.store.insert(session).await;
        let snapshot = handle.lock().await.clone();
        Ok(snapshot)
    }
}
