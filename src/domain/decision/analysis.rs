//! Analysis result entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Confidence, ValidationError};

/// Synthesized recommendation for a completed decision flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Short, punchy recommendation (e.g. "Go for it!").
    recommendation: String,
    /// Markdown-formatted reasoning referencing the user's answers.
    reasoning: String,
    /// How consistent and clear the answers were.
    confidence: Confidence,
}

impl Analysis {
    /// Creates a validated analysis.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if recommendation or reasoning is blank
    pub fn new(
        recommendation: impl Into<String>,
        reasoning: impl Into<String>,
        confidence: Confidence,
    ) -> Result<Self, ValidationError> {
        let recommendation = recommendation.into();
        let reasoning = reasoning.into();

        if recommendation.trim().is_empty() {
            return Err(ValidationError::empty_field("recommendation"));
        }
        if reasoning.trim().is_empty() {
            return Err(ValidationError::empty_field("reasoning"));
        }

        Ok(Self {
            recommendation,
            reasoning,
            confidence,
        })
    }

    /// Returns the recommendation line.
    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    /// Returns the markdown reasoning.
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    /// Returns the confidence score.
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_accepts_valid_result() {
        let a = Analysis::new(
            "Go for it!",
            "- **You lean yes.** Most answers pointed forward.",
            Confidence::new(85),
        )
        .unwrap();
        assert_eq!(a.recommendation(), "Go for it!");
        assert_eq!(a.confidence().value(), 85);
    }

    #[test]
    fn analysis_rejects_blank_fields() {
        assert!(Analysis::new("", "reasoning", Confidence::ZERO).is_err());
        assert!(Analysis::new("Wait.", "  ", Confidence::ZERO).is_err());
    }
}
