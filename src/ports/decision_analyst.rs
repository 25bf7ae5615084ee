//! Decision analyst port.

use async_trait::async_trait;

use crate::domain::decision::{Analysis, Question};

use super::AiError;

/// Port for synthesizing a recommendation from a completed Q&A transcript.
///
/// # Contract
///
/// `questions` and `answers` have the same length, paired by position in
/// swipe order. Idempotent to retry: identical inputs may yield a different
/// (model-generated) result, which is accepted non-determinism, not a bug.
#[async_trait]
pub trait DecisionAnalyst: Send + Sync {
    /// Produces a recommendation with reasoning and confidence.
    async fn analyze(
        &self,
        prompt: &str,
        questions: &[Question],
        answers: &[bool],
    ) -> Result<Analysis, AiError>;
}
