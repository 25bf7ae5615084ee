//! CardLeftViewHandler - resolves stale exit-animation callbacks.

use std::sync::Arc;

use crate::domain::decision::CardFate;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::FlowError;

/// Query from the gesture adapter: the card at `index` finished leaving
/// the view; should it be restored?
#[derive(Debug, Clone)]
pub struct CardLeftViewQuery {
    pub session_id: SessionId,
    pub index: usize,
}

/// Handler for exit-animation bookkeeping.
pub struct CardLeftViewHandler {
    store: Arc<dyn SessionStore>,
}

impl CardLeftViewHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: CardLeftViewQuery) -> Result<CardFate, FlowError> {
        let handle = self.store.get(query.session_id).await?;
        let fate = handle.lock().await.card_left_view(query.index);
        Ok(fate)
    }
}
