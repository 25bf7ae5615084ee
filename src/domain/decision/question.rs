//! Question card entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Maximum length for question text.
pub const MAX_QUESTION_LENGTH: usize = 500;

/// One styled yes/no question, shown as a swipeable card.
///
/// Questions are produced by the LLM and immutable once generated; a question
/// is identified by its position in the deck, not by an id.
///
/// # Invariants
///
/// - `text` is 1-500 characters, non-empty
/// - `background` and `foreground` are non-empty CSS style tokens
///   (a gradient or color, and a contrasting text color)
/// - `emoji` is a single grapheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    text: String,
    background: String,
    foreground: String,
    emoji: String,
}

impl Question {
    /// Creates a validated question card.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if any field is blank
    /// - `OutOfRange` if text exceeds the length limit
    /// - `InvalidFormat` if emoji contains whitespace or is implausibly long
    pub fn new(
        text: impl Into<String>,
        background: impl Into<String>,
        foreground: impl Into<String>,
        emoji: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        let background = background.into();
        let foreground = foreground.into();
        let emoji = emoji.into();

        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        if text.chars().count() > MAX_QUESTION_LENGTH {
            return Err(ValidationError::out_of_range(
                "text",
                1,
                MAX_QUESTION_LENGTH as i64,
                text.chars().count() as i64,
            ));
        }
        if background.trim().is_empty() {
            return Err(ValidationError::empty_field("background"));
        }
        if foreground.trim().is_empty() {
            return Err(ValidationError::empty_field("foreground"));
        }
        Self::validate_emoji(&emoji)?;

        Ok(Self {
            text,
            background,
            foreground,
            emoji,
        })
    }

    // A single grapheme cluster can span several scalars (flags, ZWJ
    // sequences), so the check is a plausibility bound, not a strict count.
    fn validate_emoji(emoji: &str) -> Result<(), ValidationError> {
        if emoji.is_empty() {
            return Err(ValidationError::empty_field("emoji"));
        }
        if emoji.chars().any(char::is_whitespace) || emoji.chars().count() > 12 {
            return Err(ValidationError::invalid_format(
                "emoji",
                "expected a single emoji grapheme",
            ));
        }
        Ok(())
    }

    /// Returns the question text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the card background style token.
    pub fn background(&self) -> &str {
        &self.background
    }

    /// Returns the card foreground (text color) token.
    pub fn foreground(&self) -> &str {
        &self.foreground
    }

    /// Returns the card emoji.
    pub fn emoji(&self) -> &str {
        &self.emoji
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(text: &str) -> Result<Question, ValidationError> {
        Question::new(
            text,
            "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
            "#FFFFFF",
            "🤔",
        )
    }

    #[test]
    fn question_accepts_valid_card() {
        let q = card("Would you regret not trying this?").unwrap();
        assert_eq!(q.text(), "Would you regret not trying this?");
        assert_eq!(q.emoji(), "🤔");
    }

    #[test]
    fn question_rejects_blank_text() {
        assert!(card("   ").is_err());
    }

    #[test]
    fn question_rejects_oversized_text() {
        assert!(card(&"x".repeat(MAX_QUESTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn question_rejects_blank_style_tokens() {
        assert!(Question::new("ok?", "", "#fff", "🎯").is_err());
        assert!(Question::new("ok?", "#111", " ", "🎯").is_err());
    }

    #[test]
    fn question_rejects_sentence_as_emoji() {
        assert!(Question::new("ok?", "#111", "#fff", "not an emoji").is_err());
        assert!(Question::new("ok?", "#111", "#fff", "").is_err());
    }

    #[test]
    fn question_accepts_multi_scalar_emoji() {
        // Family emoji is several scalars joined with ZWJ
        assert!(Question::new("ok?", "#111", "#fff", "👨‍👩‍👧").is_ok());
    }
}
