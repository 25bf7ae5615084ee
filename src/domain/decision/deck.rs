//! Card deck - sequencing of swipeable question cards.
//!
//! The deck presents N cards top-to-bottom, captures one boolean answer per
//! card, and reports completion exactly once when all cards are consumed.
//! Cards are drawn in reverse (the first question is the topmost card at
//! index N-1), but answers are recorded in swipe order, i.e. chronologically.

use serde::{Deserialize, Serialize};

use super::DecisionError;

/// Direction of a swipe gesture or button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Maps a direction to an answer: right is yes, left is no.
    ///
    /// Vertical swipes carry no answer and are rejected by the deck.
    pub fn as_answer(self) -> Option<bool> {
        match self {
            SwipeDirection::Right => Some(true),
            SwipeDirection::Left => Some(false),
            SwipeDirection::Up | SwipeDirection::Down => None,
        }
    }
}

/// Result of an accepted swipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// A card was consumed; `active_index` is the new top card.
    Advanced { active_index: usize },
    /// The deck is exhausted and a swipe arrived anyway; nothing changed.
    Ignored,
    /// The last card was consumed. Reported exactly once per deck.
    Completed { answers: Vec<bool> },
}

/// What to do with a card whose exit animation finished.
///
/// The gesture library can deliver animation callbacks out of order or for
/// cards the controller no longer considers consumed; those cards must be
/// restored to the stack rather than left half off-screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFate {
    Restore,
    Ignore,
}

/// Tracks which card is active and records answers in swipe order.
///
/// # Invariants
///
/// - `answers.len() + active cards == total`
/// - `active_index` strictly decreases per accepted swipe, never increases
/// - completion is reported exactly once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDeck {
    total: usize,
    /// Top card of the stack; `None` once all cards are consumed.
    active_index: Option<usize>,
    /// Answers in chronological swipe order.
    answers: Vec<bool>,
}

impl CardDeck {
    /// Creates a deck of `total` cards with the top card at `total - 1`.
    ///
    /// # Errors
    ///
    /// - `EmptyDeck` if `total` is zero
    pub fn new(total: usize) -> Result<Self, DecisionError> {
        if total == 0 {
            return Err(DecisionError::EmptyDeck);
        }
        Ok(Self {
            total,
            active_index: Some(total - 1),
            answers: Vec::with_capacity(total),
        })
    }

    /// Records one answer and advances the stack.
    ///
    /// Swiping an exhausted deck is a no-op (`Ignored`). Consuming the last
    /// card yields `Completed` with the answers in swipe order.
    ///
    /// # Errors
    ///
    /// - `UnsupportedDirection` for up/down swipes
    pub fn swipe(&mut self, direction: SwipeDirection) -> Result<SwipeOutcome, DecisionError> {
        let answer = direction
            .as_answer()
            .ok_or(DecisionError::UnsupportedDirection(direction))?;

        let Some(active) = self.active_index else {
            return Ok(SwipeOutcome::Ignored);
        };

        self.answers.push(answer);

        if active == 0 {
            self.active_index = None;
            Ok(SwipeOutcome::Completed {
                answers: self.answers.clone(),
            })
        } else {
            self.active_index = Some(active - 1);
            Ok(SwipeOutcome::Advanced {
                active_index: active - 1,
            })
        }
    }

    /// Programmatic swipe (e.g. the yes/no buttons); same path as a drag.
    pub fn request_swipe(
        &mut self,
        direction: SwipeDirection,
    ) -> Result<SwipeOutcome, DecisionError> {
        self.swipe(direction)
    }

    /// Handles an exit-animation callback for the card at `index`.
    ///
    /// A card at or ahead of the active pointer has not been consumed, so a
    /// stale or duplicate callback for it must restore the card. Purely
    /// visual bookkeeping; answers are never touched here.
    pub fn card_left_view(&self, index: usize) -> CardFate {
        match self.active_index {
            Some(active) if active >= index => CardFate::Restore,
            _ => CardFate::Ignore,
        }
    }

    /// Returns the current top card, or `None` once exhausted.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Returns the answers recorded so far, in swipe order.
    pub fn answers(&self) -> &[bool] {
        &self.answers
    }

    /// Returns the deck size.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns how many cards have been answered.
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// Returns true once every card has been answered.
    pub fn is_exhausted(&self) -> bool {
        self.active_index.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn deck_rejects_zero_cards() {
        assert!(matches!(CardDeck::new(0), Err(DecisionError::EmptyDeck)));
    }

    #[test]
    fn deck_starts_with_top_card_at_n_minus_one() {
        let deck = CardDeck::new(3).unwrap();
        assert_eq!(deck.active_index(), Some(2));
        assert!(deck.answers().is_empty());
    }

    #[test]
    fn right_is_yes_left_is_no_in_swipe_order() {
        let mut deck = CardDeck::new(3).unwrap();
        deck.swipe(SwipeDirection::Right).unwrap();
        deck.swipe(SwipeDirection::Left).unwrap();
        let outcome = deck.swipe(SwipeDirection::Right).unwrap();
        assert_eq!(
            outcome,
            SwipeOutcome::Completed {
                answers: vec![true, false, true]
            }
        );
    }

    #[test]
    fn vertical_swipes_are_rejected_and_record_nothing() {
        let mut deck = CardDeck::new(2).unwrap();
        assert!(deck.swipe(SwipeDirection::Up).is_err());
        assert!(deck.swipe(SwipeDirection::Down).is_err());
        assert_eq!(deck.active_index(), Some(1));
        assert!(deck.answers().is_empty());
    }

    #[test]
    fn swiping_an_exhausted_deck_is_a_no_op() {
        let mut deck = CardDeck::new(1).unwrap();
        assert!(matches!(
            deck.swipe(SwipeDirection::Left).unwrap(),
            SwipeOutcome::Completed { .. }
        ));
        assert_eq!(deck.swipe(SwipeDirection::Right).unwrap(), SwipeOutcome::Ignored);
        assert_eq!(deck.answers(), &[false]);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut deck = CardDeck::new(2).unwrap();
        deck.swipe(SwipeDirection::Right).unwrap();
        let first = deck.swipe(SwipeDirection::Right).unwrap();
        assert!(matches!(first, SwipeOutcome::Completed { .. }));
        for _ in 0..3 {
            assert_eq!(deck.swipe(SwipeDirection::Left).unwrap(), SwipeOutcome::Ignored);
        }
        assert_eq!(deck.answers().len(), 2);
    }

    #[test]
    fn request_swipe_follows_the_same_path() {
        let mut deck = CardDeck::new(2).unwrap();
        deck.request_swipe(SwipeDirection::Left).unwrap();
        assert_eq!(deck.answers(), &[false]);
        assert_eq!(deck.active_index(), Some(0));
    }

    #[test]
    fn stale_exit_animation_restores_unconsumed_cards() {
        let mut deck = CardDeck::new(3).unwrap();
        deck.swipe(SwipeDirection::Right).unwrap(); // active now 1
        assert_eq!(deck.card_left_view(1), CardFate::Restore);
        assert_eq!(deck.card_left_view(0), CardFate::Restore);
        assert_eq!(deck.card_left_view(2), CardFate::Ignore);
    }

    #[test]
    fn exit_animations_after_exhaustion_are_ignored() {
        let mut deck = CardDeck::new(1).unwrap();
        deck.swipe(SwipeDirection::Right).unwrap();
        assert_eq!(deck.card_left_view(0), CardFate::Ignore);
    }

    proptest! {
        /// After n answerable swipes, answers match the direction mapping
        /// in call order and the deck is exhausted.
        #[test]
        fn answers_preserve_swipe_order(directions in prop::collection::vec(prop::bool::ANY, 1..30)) {
            let n = directions.len();
            let mut deck = CardDeck::new(n).unwrap();
            for (i, yes) in directions.iter().enumerate() {
                let dir = if *yes { SwipeDirection::Right } else { SwipeDirection::Left };
                let outcome = deck.swipe(dir).unwrap();
                if i + 1 == n {
                    prop_assert_eq!(outcome, SwipeOutcome::Completed { answers: directions.clone() });
                } else {
                    prop_assert_eq!(outcome, SwipeOutcome::Advanced { active_index: n - 2 - i });
                }
            }
            prop_assert!(deck.is_exhausted());
            prop_assert_eq!(deck.answers().to_vec(), directions);
        }

        /// The active index strictly decreases and is never re-incremented.
        #[test]
        fn active_index_is_strictly_decreasing(n in 1usize..30, extra in 0usize..5) {
            let mut deck = CardDeck::new(n).unwrap();
            let mut last = deck.active_index();
            for _ in 0..n {
                deck.swipe(SwipeDirection::Right).unwrap();
                let current = deck.active_index();
                match (last, current) {
                    (Some(prev), Some(now)) => prop_assert_eq!(now, prev - 1),
                    (Some(0), None) => {}
                    (Some(prev), None) => prop_assert_eq!(prev, 0),
                    (None, _) => prop_assert!(false, "deck exhausted too early"),
                }
                last = current;
            }
            // Once exhausted, further swipes change nothing.
            for _ in 0..extra {
                prop_assert_eq!(deck.swipe(SwipeDirection::Left).unwrap(), SwipeOutcome::Ignored);
                prop_assert_eq!(deck.active_index(), None);
            }
            prop_assert_eq!(deck.answers().len(), n);
        }
    }
}
