//! Adapters - implementations of the ports.
//!
//! - `ai` - OpenRouter structured-output client (and a mock for tests)
//! - `memory` - in-memory session store
//! - `http` - REST API and invite-gate middleware

pub mod ai;
pub mod http;
pub mod memory;
