//! Error types for resolver operations.
//!
//! Findings such as conflicts or missing dependencies are returned as data in
//! the result records. The errors here are reserved for operations that
//! cannot produce a meaningful result at all.

use thiserror::Error;

/// Result type for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that abort a single resolver operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The dependency graph contains a cycle, so no deployment order exists.
    ///
    /// `agents` lists every agent that could not be placed in a batch.
    #[error("Circular dependency detected among agents: {}", agents.join(", "))]
    CycleDetected { agents: Vec<String> },

    /// Two manifests of different agents were passed for comparison.
    #[error("Cannot compare manifests of different agents: {old} vs {new}")]
    AgentMismatch { old: String, new: String },

    /// Graph export was requested in a format that does not exist.
    #[error("Unknown graph format: {0} (expected \"dot\" or \"json\")")]
    UnknownGraphFormat(String),

    /// Graph export could not be serialized.
    #[error("Failed to serialize dependency graph: {0}")]
    Serialize(String),
}
