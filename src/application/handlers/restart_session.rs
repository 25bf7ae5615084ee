//! RestartSessionHandler - returns a session to `Start`.

use std::sync::Arc;

use crate::domain::decision::DecisionSession;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::FlowError;

/// Command to restart a session, discarding all its data.
#[derive(Debug, Clone)]
pub struct RestartSessionCommand {
    pub session_id: SessionId,
}

/// Handler for explicit restarts.
pub struct RestartSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl RestartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Discards prompt, questions and answers; valid from any phase.
    pub async fn handle(
        &self,
        cmd: RestartSessionCommand,
    ) -> Result<DecisionSession, FlowError> {
        let handle = self.store.get(cmd.session_id).await?;
        let snapshot = {
            let mut session = handle.lock().await;
            session.restart();
            session.clone()
        };
        tracing::info!(session_id = %cmd.session_id, "session restarted");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::decision::{Phase, Question, SwipeDirection};

    #[tokio::test]
    async fn restart_discards_all_session_data() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut session = DecisionSession::new(SessionId::new());
        let questions = vec![Question::new("Q?", "#111", "#fff", "🎯").unwrap()];
        session.begin("Should I?", questions).unwrap();
        session.swipe(SwipeDirection::Right).unwrap();
        let id = session.id();
        store.insert(session).await;

        let handler = RestartSessionHandler::new(Arc::clone(&store) as Arc<dyn SessionStore>);
        let restarted = handler
            .handle(RestartSessionCommand { session_id: id })
            .await
            .unwrap();

        assert_eq!(restarted.phase(), Phase::Start);
        assert!(restarted.prompt().is_none());
        assert!(restarted.answers().is_empty());

        // The stored session was reset too, not just the snapshot.
        let stored = store.get(id).await.unwrap().lock().await.clone();
        assert_eq!(stored.phase(), Phase::Start);
    }

    #[tokio::test]
    async fn restarting_an_unknown_session_fails() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = RestartSessionHandler::new(store as Arc<dyn SessionStore>);
        assert!(handler
            .handle(RestartSessionCommand {
                session_id: SessionId::new()
            })
            .await
            .is_err());
    }
}
