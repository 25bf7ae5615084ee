//! Session store port.
//!
//! Sessions are ephemeral: one per decision flow, destroyed on restart or
//! server shutdown. There is no durable persistence behind this port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::decision::DecisionSession;
use crate::domain::foundation::SessionId;

/// Exclusive handle to one session.
///
/// All state transitions for a session happen while holding this lock,
/// which is what guarantees answers append in strict swipe order even under
/// rapid successive requests: the controller processes one event at a time.
pub type SessionHandle = Arc<Mutex<DecisionSession>>;

/// Errors from session storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No session with this id.
    #[error("session {0} not found")]
    NotFound(SessionId),
}

/// Port for session lifetime management.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Inserts a new session, replacing any previous one with the same id.
    async fn insert(&self, session: DecisionSession) -> SessionHandle;

    /// Looks up the handle for a session.
    async fn get(&self, id: SessionId) -> Result<SessionHandle, StoreError>;
}
