//! Error types for record generation and dispatch.

use thiserror::Error;

/// Errors surfaced by generation, batching and parallel dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Requested entity kind is not one of user, product or order.
    #[error("Unknown entity kind: '{0}' (expected one of: user, product, order)")]
    UnknownKind(String),

    /// Requested operation is not one of insert, update, delete or random-mix.
    #[error("Unknown operation: '{0}' (expected one of: insert, update, delete, random-mix)")]
    UnknownOperation(String),

    /// A parallel worker failed while generating its chunk.
    #[error("Worker {worker} failed: {reason}")]
    WorkerFailure {
        /// Zero-based worker index.
        worker: usize,
        /// What went wrong.
        reason: String,
    },

    /// The job descriptor itself is unusable (e.g. zero workers).
    #[error("Invalid generation job: {0}")]
    InvalidJob(String),
}
