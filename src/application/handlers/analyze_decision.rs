//! AnalyzeDecisionHandler - synthesizes the recommendation.

use std::sync::Arc;

use crate::domain::decision::{Analysis, DecisionError};
use crate::domain::foundation::SessionId;
use crate::ports::{DecisionAnalyst, SessionStore};

use super::FlowError;

/// Command to run (or retry) the analysis for a completed session.
#[derive(Debug, Clone)]
pub struct AnalyzeDecisionCommand {
    pub session_id: SessionId,
}

/// Handler for the analysis request.
pub struct AnalyzeDecisionHandler {
    analyst: Arc<dyn DecisionAnalyst>,
    store: Arc<dyn SessionStore>,
}

impl AnalyzeDecisionHandler {
    pub fn new(analyst: Arc<dyn DecisionAnalyst>, store: Arc<dyn SessionStore>) -> Self {
        Self { analyst, store }
    }

    /// Sends the full Q&A transcript to the model.
    ///
    /// Valid only once the session reached `Results`. A failure leaves the
    /// session untouched, so the caller can re-issue the identical request;
    /// a retry may legitimately produce a different recommendation.
    pub async fn handle(&self, cmd: AnalyzeDecisionCommand) -> Result<Analysis, FlowError> {
        let handle = self.store.get(cmd.session_id).await?;

        // Snapshot the transcript, then release the lock for the slow call.
        let (prompt, questions, answers) = {
            let session = handle.lock().await;
            let (prompt, questions, answers) = session.completed().ok_or_else(|| {
                DecisionError::invalid_phase("analyze", session.phase())
            })?;
            (prompt.to_string(), questions.to_vec(), answers.to_vec())
        };

        let analysis = self
            .analyst
            .analyze(&prompt, &questions, &answers)
            .await
            .map_err(FlowError::Analysis)?;

        tracing::info!(
            session_id = %cmd.session_id,
            confidence = analysis.confidence().value(),
            "analysis completed"
        );
        Ok(analysis)
    }
}
