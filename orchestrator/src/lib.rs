//! Orchestration core of the dataset annotation pipeline.
//!
//! Decides which action a dataset change requires and runs or enqueues it, registers optical
//! images onto the annotation image grid and assembles theoretical peak tables.

pub mod cli;
pub mod core;
pub mod error;
pub mod service;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod tests;

// Re-export commonly used item
pub use error::{OrchestratorError, OrchestratorResult};
