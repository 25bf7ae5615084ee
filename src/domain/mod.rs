//! Domain layer - pure types and state machines, no I/O.

pub mod decision;
pub mod foundation;
