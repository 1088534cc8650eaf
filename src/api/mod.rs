//! Invocation parsing, response envelopes and the shared Lambda handler

pub mod envelope;
pub mod handler;
pub mod invocation;

// Re-export the main handler for convenience
pub use handler::{Function, function_handler, respond, run};
