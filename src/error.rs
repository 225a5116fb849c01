//! Unified error types for failfast.
//!
//! Wraps the core [`StructuralConflict`] and adds the failure modes of the
//! drivers: bad configuration and worker threads that could not be spawned
//! or did not finish.

use failfast_core::StructuralConflict;
use thiserror::Error;

/// All failfast errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A strict cursor observed a structural modification
    #[error("conflict: {0}")]
    Conflict(#[from] StructuralConflict),

    /// Configuration rejected at build time, or an unknown name
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A worker thread panicked before it could be joined
    #[error("worker panicked: {0}")]
    WorkerPanicked(String),

    /// I/O error (thread spawn)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for failfast operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// A conflict goes away by starting a fresh traversal.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if this is a structural conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }
}
