//! Convenient imports for failfast.
//!
//! ```ignore
//! use failfast::prelude::*;
//!
//! let set: SetOf<u32> = (1..=3).collect();
//! for item in set.iter() {
//!     let value = item?;
//! }
//! ```

// Strict containers
pub use crate::{FailFastCursor, Mapping, Sequence, SetOf, StrictContainer, StructuralConflict};

// Weakly-consistent containers
pub use crate::{ConcurrentMapping, ConcurrentSet};

// Error handling
pub use crate::error::{Error, Result};

// Drivers
pub use crate::config::{StressConfig, TraversalMode};
pub use crate::types::{ContainerKind, DemonstrationReport};
