//! AI adapters - hosted-model integrations for question generation and
//! decision analysis.

mod mock;
mod openrouter;
mod prompts;
mod schema;

pub use mock::MockDecisionAi;
pub use openrouter::{OpenRouterClient, OpenRouterConfig, DEFAULT_MODEL};
