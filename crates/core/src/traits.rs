//! Trait seam between strict containers and [`FailFastCursor`]
//!
//! A strict container exposes its elements by position, owns a
//! [`ModificationCounter`](crate::ModificationCounter), and routes removals
//! through `remove_at` so the counter always reflects membership changes.
//! The cursor logic is written once against this trait and shared by
//! [`Sequence`](crate::Sequence), [`Mapping`](crate::Mapping) and
//! [`SetOf`](crate::SetOf).

use crate::cursor::{CursorPosition, FailFastCursor};

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for crate::Sequence<T> {}
    impl<K, V> Sealed for crate::Mapping<K, V> {}
    impl<T> Sealed for crate::SetOf<T> {}
}

/// A container that detects structural modification during traversal.
///
/// Sealed: only the containers in this crate implement it, which keeps the
/// counter private to its owner.
pub trait StrictContainer: sealed::Sealed {
    /// Element produced by a cursor (an owned clone)
    type Item;

    /// Number of elements currently stored
    fn len(&self) -> usize;

    /// True when the container holds no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live value of the container's modification counter
    fn modification_count(&self) -> u64;

    /// Process-unique identity of this container
    #[doc(hidden)]
    fn owner_id(&self) -> u64;

    /// Clone of the element at `index`, if any
    #[doc(hidden)]
    fn item_at(&self, index: usize) -> Option<Self::Item>;

    /// Remove the element at `index`, counting it as one structural
    /// modification
    #[doc(hidden)]
    fn remove_at(&self, index: usize) -> Option<Self::Item>;

    /// Begin a traversal.
    ///
    /// The cursor snapshots the modification counter now and validates it
    /// before every advance.
    fn cursor(&self) -> FailFastCursor<'_, Self>
    where
        Self: Sized,
    {
        FailFastCursor::new(self)
    }

    /// Reattach a detached cursor, keeping its original snapshot.
    ///
    /// The resumed cursor fails on its next advance if the container changed
    /// membership while it was detached.
    ///
    /// # Panics
    ///
    /// Panics if `position` was taken from a different container. Clones
    /// count as different containers.
    fn resume(&self, position: CursorPosition) -> FailFastCursor<'_, Self>
    where
        Self: Sized,
    {
        FailFastCursor::resume(self, position)
    }

    /// "For-each" style traversal; equivalent to [`StrictContainer::cursor`]
    /// used through its [`Iterator`] implementation.
    fn iter(&self) -> FailFastCursor<'_, Self>
    where
        Self: Sized,
    {
        self.cursor()
    }
}
