//! Associative mapping with fail-fast traversal
//!
//! Backed by an insertion-ordered `IndexMap` with FxHash so cursors can walk
//! entries by position. Removal shifts later entries down, keeping the order
//! stable for a cursor that removes through itself.

use std::borrow::Borrow;
use std::cell::RefCell;
use std::hash::{BuildHasherDefault, Hash};

use indexmap::IndexMap;
use rustc_hash::FxHasher;

use crate::counter::ModificationCounter;
use crate::cursor::FailFastCursor;
use crate::error::Result;
use crate::traits::StrictContainer;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Key/value mapping that detects structural modification during traversal.
///
/// Inserting a new key or removing a present key is structural. Replacing
/// the value of an existing key is not.
#[derive(Debug)]
pub struct Mapping<K, V> {
    entries: RefCell<FxIndexMap<K, V>>,
    modifications: ModificationCounter,
}

impl<K: Hash + Eq, V> Mapping<K, V> {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(FxIndexMap::default()),
            modifications: ModificationCounter::new(),
        }
    }

    /// Create an empty mapping with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RefCell::new(FxIndexMap::with_capacity_and_hasher(
                capacity,
                Default::default(),
            )),
            modifications: ModificationCounter::new(),
        }
    }

    /// Insert or replace the value for `key`.
    ///
    /// Returns the previous value. Only a new key counts as a modification.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let previous = self.entries.borrow_mut().insert(key, value);
        if previous.is_none() {
            self.modifications.increment();
        }
        previous
    }

    /// Remove `key`, returning its value.
    ///
    /// Removing an absent key is a no-op that does not count a modification.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.entries.borrow_mut().shift_remove(key);
        if removed.is_some() {
            self.modifications.increment();
        }
        removed
    }

    /// Check whether `key` is present
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.borrow().contains_key(key)
    }

    /// Remove every entry. Counts as one modification when anything was
    /// removed.
    pub fn clear(&self) {
        let mut entries = self.entries.borrow_mut();
        if !entries.is_empty() {
            entries.clear();
            self.modifications.increment();
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Mapping<K, V> {
    /// Clone of the value stored for `key`
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.borrow().get(key).cloned()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> Vec<K> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> Vec<(K, V)> {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K: Hash + Eq + Clone, V: Clone> StrictContainer for Mapping<K, V> {
    type Item = (K, V);

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn modification_count(&self) -> u64 {
        self.modifications.snapshot()
    }

    fn owner_id(&self) -> u64 {
        self.modifications.owner()
    }

    fn item_at(&self, index: usize) -> Option<(K, V)> {
        self.entries
            .borrow()
            .get_index(index)
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    fn remove_at(&self, index: usize) -> Option<(K, V)> {
        let removed = self.entries.borrow_mut().shift_remove_index(index);
        if removed.is_some() {
            self.modifications.increment();
        }
        removed
    }
}

impl<K: Hash + Eq, V> Default for Mapping<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for Mapping<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: RefCell::new(iter.into_iter().collect()),
            modifications: ModificationCounter::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Clone for Mapping<K, V> {
    fn clone(&self) -> Self {
        self.entries().into_iter().collect()
    }
}

impl<'a, K: Hash + Eq + Clone, V: Clone> FailFastCursor<'a, Mapping<K, V>> {
    /// Replace the value of the entry most recently returned by this cursor.
    ///
    /// Not structural. Returns `Ok(false)` when there is no such entry.
    pub fn set_value(&mut self, value: V) -> Result<bool> {
        self.check()?;
        let Some(index) = self.last else {
            return Ok(false);
        };
        match self.container.entries.borrow_mut().get_index_mut(index) {
            Some((_, slot)) => {
                *slot = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
