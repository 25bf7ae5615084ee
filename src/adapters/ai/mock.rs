//! Mock AI for testing.
//!
//! Implements both AI ports with queued responses and call tracking, so
//! handler and flow tests run without touching the network.
//!
//! # Example
//!
//! ```ignore
//! let ai = MockDecisionAi::new()
//!     .with_questions(vec![question("Is it affordable?")])
//!     .with_analysis(analysis("Go for it!", 85));
//!
//! let deck = ai.generate("Should I move?", QuestionCount::new(1)).await?;
//! assert_eq!(ai.generate_calls().len(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::decision::{Analysis, Question};
use crate::domain::foundation::QuestionCount;
use crate::ports::{AiError, DecisionAnalyst, QuestionGenerator};

/// A recorded generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCall {
    pub prompt: String,
    pub count: QuestionCount,
}

/// A recorded analysis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeCall {
    pub prompt: String,
    pub questions: Vec<Question>,
    pub answers: Vec<bool>,
}

/// Mock implementation of both AI ports.
///
/// Queued responses are consumed in order; an empty queue yields an
/// `Unavailable` error so tests fail loudly on unexpected calls.
#[derive(Default)]
pub struct MockDecisionAi {
    question_responses: Mutex<VecDeque<Result<Vec<Question>, AiError>>>,
    analysis_responses: Mutex<VecDeque<Result<Analysis, AiError>>>,
    generate_calls: Mutex<Vec<GenerateCall>>,
    analyze_calls: Mutex<Vec<AnalyzeCall>>,
}

impl MockDecisionAi {
    /// Creates a mock with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful question deck.
    pub fn with_questions(self, questions: Vec<Question>) -> Self {
        self.question_responses
            .lock()
            .unwrap()
            .push_back(Ok(questions));
        self
    }

    /// Queues a failed generation.
    pub fn with_generation_error(self, error: AiError) -> Self {
        self.question_responses
            .lock()
            .unwrap()
            .push_back(Err(error));
        self
    }

    /// Queues a successful analysis.
    pub fn with_analysis(self, analysis: Analysis) -> Self {
        self.analysis_responses
            .lock()
            .unwrap()
            .push_back(Ok(analysis));
        self
    }

    /// Queues a failed analysis.
    pub fn with_analysis_error(self, error: AiError) -> Self {
        self.analysis_responses
            .lock()
            .unwrap()
            .push_back(Err(error));
        self
    }

    /// Returns all generation calls seen so far.
    pub fn generate_calls(&self) -> Vec<GenerateCall> {
        self.generate_calls.lock().unwrap().clone()
    }

    /// Returns all analysis calls seen so far.
    pub fn analyze_calls(&self) -> Vec<AnalyzeCall> {
        self.analyze_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionGenerator for MockDecisionAi {
    async fn generate(
        &self,
        prompt: &str,
        count: QuestionCount,
    ) -> Result<Vec<Question>, AiError> {
        self.generate_calls.lock().unwrap().push(GenerateCall {
            prompt: prompt.to_string(),
            count,
        });
        self.question_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiError::unavailable("no queued question response")))
    }
}

#[async_trait]
impl DecisionAnalyst for MockDecisionAi {
    async fn analyze(
        &self,
        prompt: &str,
        questions: &[Question],
        answers: &[bool],
    ) -> Result<Analysis, AiError> {
        self.analyze_calls.lock().unwrap().push(AnalyzeCall {
            prompt: prompt.to_string(),
            questions: questions.to_vec(),
            answers: answers.to_vec(),
        });
        self.analysis_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiError::unavailable("no queued analysis response")))
    }
}
