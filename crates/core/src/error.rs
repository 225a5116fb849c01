//! Error types for the fail-fast guard
//!
//! There is exactly one failure mode in the core: a strict cursor noticing
//! that its container changed membership behind its back. Removing an absent
//! element is a successful no-op, never an error.

use thiserror::Error;

/// Signalled by a strict cursor whose snapshot no longer matches the
/// owning container's modification counter.
///
/// The conflict is terminal for the cursor that raised it: every further
/// advance fails the same way. It is recoverable for the caller, who can
/// simply start a fresh traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("structural conflict: container modified during traversal (expected modification count {expected}, found {actual})")]
pub struct StructuralConflict {
    /// Counter value the cursor was synchronised to
    pub expected: u64,
    /// Live counter value observed at the failed check
    pub actual: u64,
}

impl StructuralConflict {
    /// Number of structural modifications the cursor missed.
    pub fn missed(&self) -> u64 {
        self.actual.saturating_sub(self.expected)
    }
}

/// Result type for cursor operations.
pub type Result<T> = std::result::Result<T, StructuralConflict>;
