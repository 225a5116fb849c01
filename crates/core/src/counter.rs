//! Per-container modification counter
//!
//! Every strict container owns one counter. Each call that changes membership
//! bumps it exactly once; cursors compare it against their snapshot before
//! every advance.
//!
//! The counter is a plain `Cell<u64>`: strict containers are single-writer
//! instruments and the counter is not a synchronisation primitive. Sharing a
//! strict container across threads requires an external lock.
//!
//! Each counter also carries a process-unique owner id so a detached cursor
//! position can only be resumed on the container it came from.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Monotonic count of structural modifications made to one container.
#[derive(Debug)]
pub struct ModificationCounter {
    value: Cell<u64>,
    owner: u64,
}

impl ModificationCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self {
            value: Cell::new(0),
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Identity of the container owning this counter
    #[inline]
    pub fn owner(&self) -> u64 {
        self.owner
    }

    /// Record one structural modification.
    ///
    /// Only the owning container calls this; it is not reachable from
    /// outside the crate.
    #[inline]
    pub(crate) fn increment(&self) {
        self.value.set(self.value.get().wrapping_add(1));
    }

    /// Current counter value
    #[inline]
    pub fn snapshot(&self) -> u64 {
        self.value.get()
    }
}

impl Default for ModificationCounter {
    fn default() -> Self {
        Self::new()
    }
}
