//! Question generator port.

use async_trait::async_trait;

use crate::domain::decision::Question;
use crate::domain::foundation::QuestionCount;

use super::AiError;

/// Port for turning a decision prompt into a styled question deck.
///
/// # Contract
///
/// Implementations must return exactly `count` questions or fail entirely;
/// a partially valid deck is never surfaced. Calling again with identical
/// inputs may legitimately yield different questions (the model is
/// non-deterministic).
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Generates `count` yes/no questions for the given decision prompt.
    async fn generate(
        &self,
        prompt: &str,
        count: QuestionCount,
    ) -> Result<Vec<Question>, AiError>;
}
