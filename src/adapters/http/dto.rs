//! HTTP DTOs for the decision API.
//!
//! These types decouple the HTTP surface from domain types. Question cards
//! keep the `question` field name the swipe UI already consumes.

use serde::{Deserialize, Serialize};

use crate::domain::decision::{
    Analysis, CardFate, DecisionSession, Phase, Question, SwipeDirection, SwipeOutcome,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a decision flow.
#[derive(Debug, Clone, Deserialize)]
pub struct StartDecisionRequest {
    pub prompt: String,
    #[serde(default)]
    pub count: Option<u8>,
}

/// Request to record one swipe.
#[derive(Debug, Clone, Deserialize)]
pub struct SwipeRequest {
    pub direction: SwipeDirection,
}

/// Request to verify an invite code.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyInviteRequest {
    pub code: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One styled question card.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub question: String,
    pub background: String,
    pub foreground: String,
    pub emoji: String,
}

impl From<&Question> for QuestionResponse {
    fn from(q: &Question) -> Self {
        Self {
            question: q.text().to_string(),
            background: q.background().to_string(),
            foreground: q.foreground().to_string(),
            emoji: q.emoji().to_string(),
        }
    }
}

/// Deck progress while swiping.
#[derive(Debug, Clone, Serialize)]
pub struct DeckProgressResponse {
    /// Top card of the stack; absent once the deck is exhausted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_index: Option<usize>,
    pub answered: usize,
    pub total: usize,
}

/// Phase-tagged session view.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuestionResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<DeckProgressResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<bool>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&DecisionSession> for SessionResponse {
    fn from(session: &DecisionSession) -> Self {
        Self {
            id: session.id().to_string(),
            phase: session.phase(),
            prompt: session.prompt().map(str::to_string),
            questions: session
                .questions()
                .map(|qs| qs.iter().map(QuestionResponse::from).collect()),
            progress: session.deck().map(|deck| DeckProgressResponse {
                active_index: deck.active_index(),
                answered: deck.answered(),
                total: deck.total(),
            }),
            answers: session.answers().to_vec(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

/// Response to a recorded swipe.
#[derive(Debug, Clone, Serialize)]
pub struct SwipeResponse {
    pub outcome: &'static str,
    pub session: SessionResponse,
}

impl SwipeResponse {
    pub fn new(outcome: &SwipeOutcome, session: &DecisionSession) -> Self {
        let outcome = match outcome {
            SwipeOutcome::Advanced { .. } => "advanced",
            SwipeOutcome::Ignored => "ignored",
            SwipeOutcome::Completed { .. } => "completed",
        };
        Self {
            outcome,
            session: session.into(),
        }
    }
}

/// Response to an exit-animation query.
#[derive(Debug, Clone, Serialize)]
pub struct CardLeftViewResponse {
    pub fate: &'static str,
}

impl From<CardFate> for CardLeftViewResponse {
    fn from(fate: CardFate) -> Self {
        Self {
            fate: match fate {
                CardFate::Restore => "restore",
                CardFate::Ignore => "ignore",
            },
        }
    }
}

/// The synthesized recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub recommendation: String,
    pub reasoning: String,
    pub confidence: u8,
}

impl From<&Analysis> for AnalysisResponse {
    fn from(analysis: &Analysis) -> Self {
        Self {
            recommendation: analysis.recommendation().to_string(),
            reasoning: analysis.reasoning().to_string(),
            confidence: analysis.confidence().value(),
        }
    }
}

/// Result of an invite verification. A mismatch is normal control flow,
/// not an error response.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyInviteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub retryable: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &'static str, retryable: bool) -> Self {
        Self {
            error: error.into(),
            code,
            retryable,
        }
    }
}
