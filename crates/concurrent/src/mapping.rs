//! Weakly-consistent concurrent mapping
//!
//! RwLock + BTreeMap. Cursors never hold the lock between advances; each
//! advance takes a short read lock, finds the first key strictly greater
//! than the last one returned, clones the entry and releases the lock.
//!
//! # Guarantees
//!
//! - A key present for the whole traversal is returned exactly once
//! - No key is returned twice (keys are visited in ascending order)
//! - Keys inserted or removed during the traversal may or may not be seen
//! - Advancing never fails; there is no modification counter

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;
use tracing::trace;

/// Thread-safe mapping with weakly-consistent traversal.
///
/// Safe to share behind an `Arc` and mutate from any thread while other
/// threads traverse it.
#[derive(Debug)]
pub struct ConcurrentMapping<K, V> {
    entries: RwLock<BTreeMap<K, V>>,
}

impl<K: Ord, V> ConcurrentMapping<K, V> {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Insert or replace the value for `key`, returning the previous value
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.entries.write().insert(key, value)
    }

    /// Remove `key`. Absent keys are a no-op.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.write().remove(key)
    }

    /// Check whether `key` is present
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.read().contains_key(key)
    }

    /// Number of entries at this instant
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when the mapping is empty at this instant
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl<K: Ord + Clone, V: Clone> ConcurrentMapping<K, V> {
    /// Clone of the value stored for `key`
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.read().get(key).cloned()
    }

    /// Keys in ascending order, as of one instant
    pub fn keys(&self) -> Vec<K> {
        self.entries.read().keys().cloned().collect()
    }

    /// Entries in ascending key order, as of one instant
    pub fn entries(&self) -> Vec<(K, V)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Begin a weakly-consistent traversal
    pub fn cursor(&self) -> WeakCursor<'_, K, V> {
        trace!(len = self.len(), "weakly-consistent traversal started");
        WeakCursor {
            mapping: self,
            last: None,
        }
    }

    /// Alias of [`ConcurrentMapping::cursor`] for `for` loops
    pub fn iter(&self) -> WeakCursor<'_, K, V> {
        self.cursor()
    }

    fn first_after(&self, last: Option<&K>) -> Option<(K, V)> {
        let entries = self.entries.read();
        let next = match last {
            None => entries.iter().next(),
            Some(key) => entries
                .range::<K, _>((Bound::Excluded(key), Bound::Unbounded))
                .next(),
        };
        next.map(|(k, v)| (k.clone(), v.clone()))
    }
}

impl<K: Ord, V> Default for ConcurrentMapping<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for ConcurrentMapping<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: RwLock::new(iter.into_iter().collect()),
        }
    }
}

/// Cursor over a [`ConcurrentMapping`].
///
/// Holds only the last key returned; the mapping stays fully available to
/// writers between advances, including writers on the same thread.
#[derive(Debug)]
pub struct WeakCursor<'a, K, V> {
    mapping: &'a ConcurrentMapping<K, V>,
    last: Option<K>,
}

impl<'a, K: Ord + Clone, V: Clone> WeakCursor<'a, K, V> {
    /// Whether an entry after the current position exists right now
    pub fn has_next(&self) -> bool {
        self.mapping.first_after(self.last.as_ref()).is_some()
    }

    /// Advance to the next entry in key order
    pub fn next_entry(&mut self) -> Option<(K, V)> {
        let entry = self.mapping.first_after(self.last.as_ref())?;
        self.last = Some(entry.0.clone());
        Some(entry)
    }

    /// Remove the entry most recently returned, if it is still present
    pub fn remove(&mut self) -> Option<V> {
        let key = self.last.as_ref()?;
        self.mapping.remove(key)
    }
}

impl<'a, K: Ord + Clone, V: Clone> Iterator for WeakCursor<'a, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry()
    }
}
