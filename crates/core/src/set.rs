//! Set with fail-fast traversal

use std::borrow::Borrow;
use std::cell::RefCell;
use std::hash::{BuildHasherDefault, Hash};

use indexmap::IndexSet;
use rustc_hash::FxHasher;

use crate::counter::ModificationCounter;
use crate::traits::StrictContainer;

type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// Set of distinct values that detects structural modification during
/// traversal.
///
/// Inserting a value already present, or removing one that is absent, is a
/// no-op and does not count as a modification.
#[derive(Debug)]
pub struct SetOf<T> {
    items: RefCell<FxIndexSet<T>>,
    modifications: ModificationCounter,
}

impl<T: Hash + Eq> SetOf<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            items: RefCell::new(FxIndexSet::default()),
            modifications: ModificationCounter::new(),
        }
    }

    /// Create an empty set with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: RefCell::new(FxIndexSet::with_capacity_and_hasher(
                capacity,
                Default::default(),
            )),
            modifications: ModificationCounter::new(),
        }
    }

    /// Add `value`; returns `true` if it was not already present
    pub fn insert(&self, value: T) -> bool {
        let inserted = self.items.borrow_mut().insert(value);
        if inserted {
            self.modifications.increment();
        }
        inserted
    }

    /// Remove `value`; returns `true` if it was present
    pub fn remove<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.items.borrow_mut().shift_remove(value);
        if removed {
            self.modifications.increment();
        }
        removed
    }

    /// Check whether `value` is present
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.borrow().contains(value)
    }

    /// Remove every value. Counts as one modification when anything was
    /// removed.
    pub fn clear(&self) {
        let mut items = self.items.borrow_mut();
        if !items.is_empty() {
            items.clear();
            self.modifications.increment();
        }
    }
}

impl<T: Hash + Eq + Clone> SetOf<T> {
    /// Values in insertion order
    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().iter().cloned().collect()
    }
}

impl<T: Hash + Eq + Clone> StrictContainer for SetOf<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.items.borrow().len()
    }

    fn modification_count(&self) -> u64 {
        self.modifications.snapshot()
    }

    fn owner_id(&self) -> u64 {
        self.modifications.owner()
    }

    fn item_at(&self, index: usize) -> Option<T> {
        self.items.borrow().get_index(index).cloned()
    }

    fn remove_at(&self, index: usize) -> Option<T> {
        let removed = self.items.borrow_mut().shift_remove_index(index);
        if removed.is_some() {
            self.modifications.increment();
        }
        removed
    }
}

impl<T: Hash + Eq> Default for SetOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> FromIterator<T> for SetOf<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: RefCell::new(iter.into_iter().collect()),
            modifications: ModificationCounter::new(),
        }
    }
}

impl<T: Hash + Eq + Clone> Clone for SetOf<T> {
    fn clone(&self) -> Self {
        self.to_vec().into_iter().collect()
    }
}
