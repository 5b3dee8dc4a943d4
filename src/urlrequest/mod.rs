//! Request orchestration: shared context and the redirect engine.

pub mod context;
pub mod job;
