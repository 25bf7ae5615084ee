//! GetSessionHandler - read-only session snapshot.

use std::sync::Arc;

use crate::domain::decision::DecisionSession;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::FlowError;

/// Query for a session's current state.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for session reads.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<DecisionSession, FlowError> {
        let handle = self.store.get(query.session_id).await?;
        let snapshot = handle.lock().await.clone();
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::decision::Phase;

    #[tokio::test]
    async fn returns_the_current_snapshot() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = DecisionSession::new(SessionId::new());
        let id = session.id();
        store.insert(session).await;

        let handler = GetSessionHandler::new(store as Arc<dyn SessionStore>);
        let snapshot = handler
            .handle(GetSessionQuery { session_id: id })
            .await
            .unwrap();
        assert_eq!(snapshot.id(), id);
        assert_eq!(snapshot.phase(), Phase::Start);
    }
}
