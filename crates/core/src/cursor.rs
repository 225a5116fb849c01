//! Fail-fast traversal cursor
//!
//! A cursor records the owning container's modification count when it is
//! created and compares it against the live counter at the start of every
//! advance. Detection is lazy: a mutation made through another handle is
//! only reported the next time this cursor advances.
//!
//! ## Known asymmetry
//!
//! [`FailFastCursor::has_next`] looks only at the traversal position and the
//! current length; it never compares counters. A loop driven by `has_next`
//! can therefore end silently after an external mutation (for example when a
//! removal shrinks the container to exactly the cursor position) without
//! ever observing the conflict.
//!
//! ## Cursor-scoped mutation
//!
//! [`FailFastCursor::remove`] (and the sequence-specific `insert`) go through
//! the container's mutation path, bump the shared counter, then resynchronise
//! this cursor's snapshot. Other outstanding cursors are not resynchronised
//! and fail on their next advance.

use crate::error::{Result, StructuralConflict};
use crate::traits::StrictContainer;

/// Detached cursor state.
///
/// Carries the snapshot and position of a cursor so it can be reattached
/// with [`StrictContainer::resume`] after the borrow of its container ended,
/// e.g. across lock acquisitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub(crate) owner: u64,
    pub(crate) expected: u64,
    pub(crate) next: usize,
    pub(crate) last: Option<usize>,
}

impl CursorPosition {
    /// Modification count the cursor is synchronised to
    pub fn expected_modifications(&self) -> u64 {
        self.expected
    }

    /// Index of the element the next advance returns
    pub fn next_index(&self) -> usize {
        self.next
    }
}

/// Traversal cursor over a strict container.
///
/// Exclusively owned by the caller that created it. Implements [`Iterator`]
/// with `Result` items for "for-each" style loops; the iterator form stops
/// after yielding its first conflict.
#[derive(Debug)]
pub struct FailFastCursor<'a, C: StrictContainer> {
    pub(crate) container: &'a C,
    pub(crate) expected: u64,
    pub(crate) next: usize,
    pub(crate) last: Option<usize>,
    fused: bool,
}

impl<'a, C: StrictContainer> FailFastCursor<'a, C> {
    pub(crate) fn new(container: &'a C) -> Self {
        Self {
            container,
            expected: container.modification_count(),
            next: 0,
            last: None,
            fused: false,
        }
    }

    pub(crate) fn resume(container: &'a C, position: CursorPosition) -> Self {
        assert!(
            position.owner == container.owner_id(),
            "cursor position resumed on a container it was not taken from"
        );
        Self {
            container,
            expected: position.expected,
            next: position.next,
            last: position.last,
            fused: false,
        }
    }

    /// Whether the traversal position has elements remaining.
    ///
    /// Does not validate the snapshot. Only a position exactly at the end
    /// reads as finished; a position left past the end by an external
    /// removal reads as not finished so the next advance reports it.
    pub fn has_next(&self) -> bool {
        self.next != self.container.len()
    }

    /// Advance and return the next element.
    ///
    /// Validates the snapshot first. Once a conflict has been returned,
    /// every later call returns the same conflict. `Ok(None)` means the
    /// traversal is exhausted.
    pub fn try_next(&mut self) -> Result<Option<C::Item>> {
        self.check()?;
        match self.container.item_at(self.next) {
            Some(item) => {
                self.last = Some(self.next);
                self.next += 1;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    /// Remove the element most recently returned by this cursor.
    ///
    /// Counts as one structural modification and resynchronises this cursor
    /// only. Returns `Ok(None)` when there is no element to remove: before
    /// the first advance, or twice in a row.
    pub fn remove(&mut self) -> Result<Option<C::Item>> {
        self.check()?;
        let Some(index) = self.last.take() else {
            return Ok(None);
        };
        let removed = self.container.remove_at(index);
        self.next = index;
        self.resync();
        Ok(removed)
    }

    /// Current state, for detaching and resuming later
    pub fn position(&self) -> CursorPosition {
        CursorPosition {
            owner: self.container.owner_id(),
            expected: self.expected,
            next: self.next,
            last: self.last,
        }
    }

    /// Release the container borrow, keeping the traversal state
    pub fn into_position(self) -> CursorPosition {
        self.position()
    }

    /// Compare the snapshot against the container's live counter.
    pub fn check(&self) -> Result<()> {
        let actual = self.container.modification_count();
        if actual == self.expected {
            Ok(())
        } else {
            Err(StructuralConflict {
                expected: self.expected,
                actual,
            })
        }
    }

    /// Adopt the container's current counter after a cursor-initiated
    /// structural change.
    pub(crate) fn resync(&mut self) {
        self.expected = self.container.modification_count();
    }
}

impl<'a, C: StrictContainer> Iterator for FailFastCursor<'a, C> {
    type Item = Result<C::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused || !self.has_next() {
            return None;
        }
        match self.try_next() {
            Ok(item) => item.map(Ok),
            Err(conflict) => {
                self.fused = true;
                Some(Err(conflict))
            }
        }
    }
}
