//! Question count value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of questions to generate for a deck.
///
/// Defaults to 10; requests outside [1, 30] are clamped rather than rejected,
/// since an out-of-range count from a client is a preference, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionCount(u8);

impl QuestionCount {
    /// Minimum deck size.
    pub const MIN: u8 = 1;

    /// Maximum deck size.
    pub const MAX: u8 = 30;

    /// Default deck size.
    pub const DEFAULT: Self = Self(10);

    /// Creates a new QuestionCount, clamping to [MIN, MAX].
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Returns the count as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the count as usize, for indexing and length comparisons.
    pub fn as_usize(&self) -> usize {
        usize::from(self.0)
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_count_defaults_to_ten() {
        assert_eq!(QuestionCount::default().value(), 10);
    }

    #[test]
    fn question_count_clamps_low_and_high() {
        assert_eq!(QuestionCount::new(0).value(), 1);
        assert_eq!(QuestionCount::new(30).value(), 30);
        assert_eq!(QuestionCount::new(200).value(), 30);
    }

    #[test]
    fn question_count_passes_through_in_range() {
        assert_eq!(QuestionCount::new(3).value(), 3);
    }
}
