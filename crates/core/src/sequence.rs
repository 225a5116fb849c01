//! Ordered sequence with fail-fast traversal

use std::cell::RefCell;

use crate::counter::ModificationCounter;
use crate::cursor::FailFastCursor;
use crate::error::Result;
use crate::traits::StrictContainer;

/// Growable ordered sequence that detects structural modification during
/// traversal.
///
/// Mutations take `&self` so a container can be changed while a cursor over
/// it is outstanding; the cursor then reports the change as a
/// [`StructuralConflict`](crate::StructuralConflict) on its next advance.
/// Not `Sync`: share it between threads only behind a lock.
///
/// Appending always changes membership. Removing a value that is not present
/// is a no-op and leaves the modification counter untouched.
#[derive(Debug)]
pub struct Sequence<T> {
    items: RefCell<Vec<T>>,
    modifications: ModificationCounter,
}

impl<T> Sequence<T> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            modifications: ModificationCounter::new(),
        }
    }

    /// Create an empty sequence with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: RefCell::new(Vec::with_capacity(capacity)),
            modifications: ModificationCounter::new(),
        }
    }

    /// Append `value` to the end of the sequence.
    pub fn insert(&self, value: T) {
        self.items.borrow_mut().push(value);
        self.modifications.increment();
    }

    /// Remove every element. Counts as one modification when anything was
    /// removed.
    pub fn clear(&self) {
        let mut items = self.items.borrow_mut();
        if !items.is_empty() {
            items.clear();
            self.modifications.increment();
        }
    }

    fn insert_at(&self, index: usize, value: T) {
        self.items.borrow_mut().insert(index, value);
        self.modifications.increment();
    }
}

impl<T: PartialEq> Sequence<T> {
    /// Remove the first element equal to `value`.
    ///
    /// Returns `false` (and does not count a modification) when no element
    /// matches.
    pub fn remove(&self, value: &T) -> bool {
        let mut items = self.items.borrow_mut();
        match items.iter().position(|item| item == value) {
            Some(index) => {
                items.remove(index);
                self.modifications.increment();
                true
            }
            None => false,
        }
    }

    /// Check whether any element equals `value`
    pub fn contains(&self, value: &T) -> bool {
        self.items.borrow().contains(value)
    }
}

impl<T: Clone> Sequence<T> {
    /// Clone of the element at `index`
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.borrow().get(index).cloned()
    }

    /// Copy of the current contents, in order
    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }
}

impl<T: Clone> StrictContainer for Sequence<T> {
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
        self.get(index)
    }

    fn remove_at(&self, index: usize) -> Option<T> {
        let mut items = self.items.borrow_mut();
        if index >= items.len() {
            return None;
        }
        let removed = items.remove(index);
        self.modifications.increment();
        Some(removed)
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    /// Builds the initial contents; construction is not a modification.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: RefCell::new(iter.into_iter().collect()),
            modifications: ModificationCounter::new(),
        }
    }
}

impl<T: Clone> Clone for Sequence<T> {
    /// Copies the contents into a new sequence with a fresh counter.
    fn clone(&self) -> Self {
        self.to_vec().into_iter().collect()
    }
}

/// Sequence-only cursor operations
impl<'a, T: Clone> FailFastCursor<'a, Sequence<T>> {
    /// Insert `value` immediately before the element the next advance
    /// returns.
    ///
    /// Structural: bumps the shared counter and resynchronises this cursor
    /// only. The inserted element is not returned by this cursor.
    pub fn insert(&mut self, value: T) -> Result<()> {
        self.check()?;
        self.container.insert_at(self.next, value);
        self.next += 1;
        self.last = None;
        self.resync();
        Ok(())
    }

    /// Replace the element most recently returned by this cursor.
    ///
    /// Not structural. Returns `Ok(false)` when there is no such element.
    pub fn set(&mut self, value: T) -> Result<bool> {
        self.check()?;
        let Some(index) = self.last else {
            return Ok(false);
        };
        match self.container.items.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
