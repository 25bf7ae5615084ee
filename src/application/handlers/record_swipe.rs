//! RecordSwipeHandler - records one answer and advances the deck.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::domain::decision::{DecisionSession, SwipeDirection, SwipeOutcome};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::FlowError;

/// Pause before surfacing completion, so the last card's exit animation
/// settles client-side. Cosmetic only; correctness never depends on it.
const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Command to record one swipe.
#[derive(Debug, Clone)]
pub struct RecordSwipeCommand {
    pub session_id: SessionId,
    pub direction: SwipeDirection,
}

/// Result of a recorded swipe.
#[derive(Debug, Clone)]
pub struct RecordSwipeResult {
    /// Session snapshot after the swipe (may have moved to `Results`).
    pub session: DecisionSession,
    /// What the deck did with the swipe.
    pub outcome: SwipeOutcome,
}

/// Handler for swipes, gesture-originated and button-originated alike.
pub struct RecordSwipeHandler {
    store: Arc<dyn SessionStore>,
    settle_delay: Duration,
}

impl RecordSwipeHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            settle_delay: SETTLE_DELAY,
        }
    }

    /// Overrides the completion settle delay (tests use zero).
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Applies one swipe under the session's lock.
    ///
    /// The lock serializes rapid successive swipes, so answers append in
    /// strict call order.
    pub async fn handle(&self, cmd: RecordSwipeCommand) -> Result<RecordSwipeResult, FlowError> {
        let handle = self.store.get(cmd.session_id).await?;

        let (session, outcome) = {
            let mut session = handle.lock().await;
            let outcome = session.swipe(cmd.direction)?;
            (session.clone(), outcome)
        };

        if let SwipeOutcome::Completed { answers } = &outcome {
            tracing::info!(
                session_id = %cmd.session_id,
                answered = answers.len(),
                "deck completed"
            );
            sleep(self.settle_delay).await;
        }

        Ok(RecordSwipeResult { session, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::decision::{DecisionError, Phase, Question};

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(format!("Question {i}?"), "#4F46E5", "#FFFFFF", "🎯").unwrap())
            .collect()
    }

    async fn swiping_session(store: &Arc<InMemorySessionStore>, n: usize) -> SessionId {
        let mut session = DecisionSession::new(SessionId::new());
        session.begin("Should I move cities?", questions(n)).unwrap();
        let id = session.id();
        store.insert(session).await;
        id
    }

    fn handler(store: &Arc<InMemorySessionStore>) -> RecordSwipeHandler {
        RecordSwipeHandler::new(Arc::clone(store) as Arc<dyn SessionStore>)
            .with_settle_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn swipes_advance_then_complete() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = swiping_session(&store, 2).await;
        let handler = handler(&store);

        let first = handler
            .handle(RecordSwipeCommand {
                session_id: id,
                direction: SwipeDirection::Right,
            })
            .await
            .unwrap();
        assert_eq!(first.outcome, SwipeOutcome::Advanced { active_index: 0 });
        assert_eq!(first.session.phase(), Phase::Swipe);

        let second = handler
            .handle(RecordSwipeCommand {
                session_id: id,
                direction: SwipeDirection::Left,
            })
            .await
            .unwrap();
        assert_eq!(
            second.outcome,
            SwipeOutcome::Completed {
                answers: vec![true, false]
            }
        );
        assert_eq!(second.session.phase(), Phase::Results);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler(&store);

        let err = handler
            .handle(RecordSwipeCommand {
                session_id: SessionId::new(),
                direction: SwipeDirection::Right,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FlowError::Decision(DecisionError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn vertical_swipe_is_rejected_without_side_effects() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = swiping_session(&store, 2).await;
        let handler = handler(&store);

        let err = handler
            .handle(RecordSwipeCommand {
                session_id: id,
                direction: SwipeDirection::Up,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FlowError::Decision(DecisionError::UnsupportedDirection(_))
        ));

        let session = store.get(id).await.unwrap().lock().await.clone();
        assert!(session.answers().is_empty());
    }

    #[tokio::test]
    async fn concurrent_swipes_never_corrupt_ordering() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = swiping_session(&store, 8).await;
        let handler = Arc::new(handler(&store));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let handler = Arc::clone(&handler);
            tasks.push(tokio::spawn(async move {
                handler
                    .handle(RecordSwipeCommand {
                        session_id: id,
                        direction: SwipeDirection::Right,
                    })
                    .await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let session = store.get(id).await.unwrap().lock().await.clone();
        assert_eq!(session.phase(), Phase::Results);
        assert_eq!(session.answers(), &[true; 8]);
    }
}
