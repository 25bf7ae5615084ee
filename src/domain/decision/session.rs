//! Decision session - the top-level phase machine.
//!
//! A session walks through three phases:
//!
//! ```text
//! Start ──begin──▶ Swipe ──last swipe──▶ Results
//!   ▲                │                      │
//!   └────restart─────┴──────restart─────────┘
//! ```
//!
//! Each phase carries only the data valid in that phase, so states like
//! "answers present while still in Start" are unrepresentable. A failed
//! question generation never reaches `begin`, leaving the session in `Start`
//! for a retry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{SessionId, Timestamp, ValidationError};

use super::deck::{CardDeck, CardFate, SwipeDirection, SwipeOutcome};
use super::errors::DecisionError;
use super::question::Question;

/// The session's current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Start,
    Swipe,
    Results,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Start => "start",
            Phase::Swipe => "swipe",
            Phase::Results => "results",
        };
        write!(f, "{name}")
    }
}

/// Phase-tagged session data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum PhaseState {
    Start,
    Swipe {
        prompt: String,
        questions: Vec<Question>,
        deck: CardDeck,
    },
    Results {
        prompt: String,
        questions: Vec<Question>,
        answers: Vec<bool>,
    },
}

/// One end-to-end decision flow, from prompt entry to recommendation.
///
/// # Invariants
///
/// - `Start → Swipe` requires at least one question
/// - `Swipe → Results` happens exactly when every question is answered
/// - restart discards prompt, questions and answers; nothing persists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSession {
    id: SessionId,
    state: PhaseState,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl DecisionSession {
    /// Creates a fresh session in the `Start` phase.
    pub fn new(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            state: PhaseState::Start,
            created_at: now,
            updated_at: now,
        }
    }

    /// Enters the `Swipe` phase with a freshly generated deck.
    ///
    /// # Errors
    ///
    /// - `InvalidPhase` unless the session is in `Start`
    /// - `Validation` if the prompt is blank
    /// - `EmptyDeck` if no questions were supplied
    pub fn begin(
        &mut self,
        prompt: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<(), DecisionError> {
        if self.phase() != Phase::Start {
            return Err(DecisionError::invalid_phase("begin", self.phase()));
        }
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(ValidationError::empty_field("prompt").into());
        }
        let deck = CardDeck::new(questions.len())?;

        self.state = PhaseState::Swipe {
            prompt,
            questions,
            deck,
        };
        self.touch();
        Ok(())
    }

    /// Records one swipe; moves to `Results` when the deck completes.
    ///
    /// Swipes that trail in after completion are a no-op (`Ignored`), the
    /// same way the deck treats an exhausted stack.
    ///
    /// # Errors
    ///
    /// - `InvalidPhase` if the session is still in `Start`
    /// - `UnsupportedDirection` for up/down swipes
    pub fn swipe(&mut self, direction: SwipeDirection) -> Result<SwipeOutcome, DecisionError> {
        match &mut self.state {
            PhaseState::Start => Err(DecisionError::invalid_phase("swipe", Phase::Start)),
            PhaseState::Results { .. } => {
                direction
                    .as_answer()
                    .ok_or(DecisionError::UnsupportedDirection(direction))?;
                Ok(SwipeOutcome::Ignored)
            }
            PhaseState::Swipe { deck, .. } => {
                let outcome = deck.swipe(direction)?;

                if matches!(outcome, SwipeOutcome::Completed { .. }) {
                    let state = std::mem::replace(&mut self.state, PhaseState::Start);
                    if let PhaseState::Swipe {
                        prompt,
                        questions,
                        deck,
                    } = state
                    {
                        self.state = PhaseState::Results {
                            prompt,
                            questions,
                            answers: deck.answers().to_vec(),
                        };
                    }
                }
                self.touch();
                Ok(outcome)
            }
        }
    }

    /// Forwards an exit-animation callback to the deck.
    ///
    /// Outside the `Swipe` phase there is no stack to restore.
    pub fn card_left_view(&self, index: usize) -> CardFate {
        match &self.state {
            PhaseState::Swipe { deck, .. } => deck.card_left_view(index),
            _ => CardFate::Ignore,
        }
    }

    /// Returns to `Start`, discarding prompt, questions and answers.
    pub fn restart(&mut self) {
        self.state = PhaseState::Start;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the current phase tag.
    pub fn phase(&self) -> Phase {
        match self.state {
            PhaseState::Start => Phase::Start,
            PhaseState::Swipe { .. } => Phase::Swipe,
            PhaseState::Results { .. } => Phase::Results,
        }
    }

    /// Returns the decision prompt, if one has been entered.
    pub fn prompt(&self) -> Option<&str> {
        match &self.state {
            PhaseState::Start => None,
            PhaseState::Swipe { prompt, .. } | PhaseState::Results { prompt, .. } => Some(prompt),
        }
    }

    /// Returns the generated questions, if any.
    pub fn questions(&self) -> Option<&[Question]> {
        match &self.state {
            PhaseState::Start => None,
            PhaseState::Swipe { questions, .. } | PhaseState::Results { questions, .. } => {
                Some(questions)
            }
        }
    }

    /// Returns the answers recorded so far, in swipe order.
    pub fn answers(&self) -> &[bool] {
        match &self.state {
            PhaseState::Start => &[],
            PhaseState::Swipe { deck, .. } => deck.answers(),
            PhaseState::Results { answers, .. } => answers,
        }
    }

    /// Returns the deck while swiping.
    pub fn deck(&self) -> Option<&CardDeck> {
        match &self.state {
            PhaseState::Swipe { deck, .. } => Some(deck),
            _ => None,
        }
    }

    /// Returns the full Q&A transcript once the session reached `Results`.
    pub fn completed(&self) -> Option<(&str, &[Question], &[bool])> {
        match &self.state {
            PhaseState::Results {
                prompt,
                questions,
                answers,
            } => Some((prompt, questions, answers)),
            _ => None,
        }
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the session was last updated.
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
