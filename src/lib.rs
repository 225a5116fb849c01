//! # failfast
//!
//! Fail-fast structural-modification detection for traversals over ordered
//! collections, with weakly-consistent concurrent alternatives and two
//! drivers that exercise them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use failfast::prelude::*;
//!
//! let values: Sequence<String> = ["a", "b"].into_iter().map(String::from).collect();
//! let mut cursor = values.cursor();
//! cursor.try_next()?;
//! values.insert("c".into());
//! assert!(cursor.try_next().is_err());
//! ```
//!
//! ## Containers
//!
//! - [`Sequence`], [`Mapping`], [`SetOf`] - strict; cursors fail with
//!   [`StructuralConflict`] after any membership change they did not make
//! - [`ConcurrentMapping`], [`ConcurrentSet`] - weakly consistent; cursors
//!   never fail and tolerate concurrent writers
//!
//! ## Drivers
//!
//! - [`demonstration`] - scripted passes that mutate during traversal
//! - [`harness`] - one mutator against concurrent traversal workers

#![warn(missing_docs)]

mod config;
mod error;
mod types;

pub mod demonstration;
pub mod harness;
pub mod prelude;

pub use config::{StressConfig, StressConfigBuilder, TraversalMode};
pub use error::{Error, Result};
pub use harness::StressReport;
pub use types::*;

// Re-export the containers
pub use failfast_concurrent::{ConcurrentMapping, ConcurrentSet, WeakCursor, WeakSetCursor};
pub use failfast_core::{
    CursorPosition, FailFastCursor, Mapping, MappingCursor, ModificationCounter, Sequence,
    SequenceCursor, SetCursor, SetOf, StrictContainer, StructuralConflict,
};
