//! Weakly-consistent concurrent set
//!
//! A [`ConcurrentMapping`] with unit values; traversal inherits the same
//! guarantees.

use std::borrow::Borrow;

use crate::mapping::{ConcurrentMapping, WeakCursor};

/// Thread-safe set with weakly-consistent traversal
#[derive(Debug)]
pub struct ConcurrentSet<T> {
    inner: ConcurrentMapping<T, ()>,
}

impl<T: Ord> ConcurrentSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            inner: ConcurrentMapping::new(),
        }
    }

    /// Add `value`; returns `true` if it was not already present
    pub fn insert(&self, value: T) -> bool {
        self.inner.insert(value, ()).is_none()
    }

    /// Remove `value`; returns `true` if it was present
    pub fn remove<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.remove(value).is_some()
    }

    /// Check whether `value` is present
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.contains_key(value)
    }

    /// Number of values at this instant
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when the set is empty at this instant
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove every value
    pub fn clear(&self) {
        self.inner.clear();
    }
}

impl<T: Ord + Clone> ConcurrentSet<T> {
    /// Values in ascending order, as of one instant
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.keys()
    }

    /// Begin a weakly-consistent traversal
    pub fn cursor(&self) -> WeakSetCursor<'_, T> {
        WeakSetCursor {
            inner: self.inner.cursor(),
        }
    }

    /// Alias of [`ConcurrentSet::cursor`] for `for` loops
    pub fn iter(&self) -> WeakSetCursor<'_, T> {
        self.cursor()
    }
}

impl<T: Ord> Default for ConcurrentSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for ConcurrentSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(|value| (value, ())).collect(),
        }
    }
}

/// Cursor over a [`ConcurrentSet`]
#[derive(Debug)]
pub struct WeakSetCursor<'a, T> {
    inner: WeakCursor<'a, T, ()>,
}

impl<'a, T: Ord + Clone> WeakSetCursor<'a, T> {
    /// Whether a value after the current position exists right now
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Remove the value most recently returned; `false` if already gone
    pub fn remove(&mut self) -> bool {
        self.inner.remove().is_some()
    }
}

impl<'a, T: Ord + Clone> Iterator for WeakSetCursor<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next_entry().map(|(value, ())| value)
    }
}
