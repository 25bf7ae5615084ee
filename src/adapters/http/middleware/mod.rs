//! HTTP middleware.

mod invite;

pub use invite::{invite_gate_middleware, InviteGate, INVITE_COOKIE_NAME};
