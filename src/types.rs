//! Shared types for the drivers: container kinds, traversal styles and the
//! reports they produce.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// The container variants the drivers can exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerKind {
    /// Strict ordered sequence
    Sequence,
    /// Strict key/value mapping
    Mapping,
    /// Strict set
    Set,
    /// Weakly-consistent mapping
    ConcurrentMapping,
    /// Weakly-consistent set
    ConcurrentSet,
}

impl ContainerKind {
    /// Strict kinds, in demonstration order
    pub const STRICT: [ContainerKind; 3] = [
        ContainerKind::Sequence,
        ContainerKind::Mapping,
        ContainerKind::Set,
    ];

    /// Every kind
    pub const ALL: [ContainerKind; 5] = [
        ContainerKind::Sequence,
        ContainerKind::Mapping,
        ContainerKind::Set,
        ContainerKind::ConcurrentMapping,
        ContainerKind::ConcurrentSet,
    ];

    /// Whether this kind detects structural conflicts
    pub fn is_strict(&self) -> bool {
        matches!(
            self,
            ContainerKind::Sequence | ContainerKind::Mapping | ContainerKind::Set
        )
    }

    /// Stable name, as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            ContainerKind::Sequence => "sequence",
            ContainerKind::Mapping => "mapping",
            ContainerKind::Set => "set",
            ContainerKind::ConcurrentMapping => "concurrent-mapping",
            ContainerKind::ConcurrentSet => "concurrent-set",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContainerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContainerKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::InvalidConfig(format!("unknown container kind: {}", s)))
    }
}

/// How a scripted pass drives its cursor.
///
/// Both styles obtain a fresh cursor for every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalStyle {
    /// `for item in container.iter()`
    ForEach,
    /// `while cursor.has_next() { cursor.try_next() }`
    Explicit,
}

/// Structural operation attempted on every step of a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Remove a labelled element
    Remove,
    /// Insert a labelled element
    Insert,
}

/// One conflict caught and logged by a scripted pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictEvent {
    /// Cursor style of the pass
    pub style: TraversalStyle,
    /// Operation the pass was performing
    pub operation: Operation,
    /// Label the operation targeted
    pub label: String,
    /// Counter value the cursor expected
    pub expected: u64,
    /// Counter value it found
    pub actual: u64,
}

/// Outcome of one scripted demonstration.
#[derive(Debug, Clone, Serialize)]
pub struct DemonstrationReport {
    /// Container kind exercised
    pub kind: ContainerKind,
    /// Conflicts caught, in the order they happened
    pub conflicts: Vec<ConflictEvent>,
    /// Final labels, in traversal order
    pub contents: Vec<String>,
    /// Final label ordinals, in traversal order
    pub ordinals: Vec<usize>,
}

impl DemonstrationReport {
    /// Final ordinals without regard to order
    pub fn ordinal_set(&self) -> BTreeSet<usize> {
        self.ordinals.iter().copied().collect()
    }
}
