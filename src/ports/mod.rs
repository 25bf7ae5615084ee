//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `QuestionGenerator` - asks the hosted model for a styled question deck
//! - `DecisionAnalyst` - asks the hosted model to synthesize a recommendation
//! - `SessionStore` - in-memory session lifetime management

mod ai_error;
mod decision_analyst;
mod question_generator;
mod session_store;

pub use ai_error::AiError;
pub use decision_analyst::DecisionAnalyst;
pub use question_generator::QuestionGenerator;
pub use session_store::{SessionHandle, SessionStore, StoreError};
