//! Fail-fast structural modification guard
//!
//! This crate implements the strict containers:
//! - [`Sequence`]: ordered, duplicates allowed
//! - [`Mapping`]: key/value, insertion ordered
//! - [`SetOf`]: distinct values, insertion ordered
//!
//! Each container owns a [`ModificationCounter`] that is bumped exactly once
//! per membership change. A [`FailFastCursor`] snapshots the counter when it
//! is created and re-validates it before every advance, reporting a
//! [`StructuralConflict`] when the container was changed through any other
//! handle in the meantime.
//!
//! Detection is single-threaded bookkeeping, not synchronisation. The
//! containers are `Send` but not `Sync`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod counter;
pub mod cursor;
pub mod error;
pub mod mapping;
pub mod sequence;
pub mod set;
pub mod traits;

pub use counter::ModificationCounter;
pub use cursor::{CursorPosition, FailFastCursor};
pub use error::{Result, StructuralConflict};
pub use mapping::Mapping;
pub use sequence::Sequence;
pub use set::SetOf;
pub use traits::StrictContainer;

/// Cursor over a [`Sequence`]
pub type SequenceCursor<'a, T> = FailFastCursor<'a, Sequence<T>>;

/// Cursor over a [`Mapping`]
pub type MappingCursor<'a, K, V> = FailFastCursor<'a, Mapping<K, V>>;

/// Cursor over a [`SetOf`]
pub type SetCursor<'a, T> = FailFastCursor<'a, SetOf<T>>;
