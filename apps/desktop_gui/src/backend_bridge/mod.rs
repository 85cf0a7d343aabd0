//! Backend worker: owns the interaction controller on its own tokio runtime.

pub mod commands;
pub mod runtime;
