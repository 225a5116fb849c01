//! Weakly-consistent concurrent containers
//!
//! Concurrency-tolerant counterparts of the strict mapping and set:
//! - [`ConcurrentMapping`]: RwLock + BTreeMap, key-ordered traversal
//! - [`ConcurrentSet`]: the same store with unit values
//!
//! These containers carry no modification counter and never report a
//! structural conflict. Their cursors are weakly consistent: an element
//! present for the whole traversal is returned exactly once, and elements
//! added or removed concurrently may or may not be observed.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod mapping;
pub mod set;

pub use mapping::{ConcurrentMapping, WeakCursor};
pub use set::{ConcurrentSet, WeakSetCursor};
