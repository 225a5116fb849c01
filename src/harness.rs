//! Concurrency stress harness.
//!
//! Runs traversal workers and one mutator against a shared container and
//! checks that no insertion is lost or duplicated.
//!
//! ## Worker layout
//!
//! ```text
//!   traversal-0 ─┐
//!   traversal-1 ─┼──> shared container <── mutator (M insertions, yields)
//!   traversal-N ─┘
//! ```
//!
//! Strict containers are not `Sync`; they are shared behind a
//! `parking_lot::Mutex`. In [`TraversalMode::Snapshot`] a worker clones the
//! container under the lock and walks its private copy. In
//! [`TraversalMode::Live`] a worker walks the shared container, detaching its
//! cursor between steps so the mutator can take the lock; a
//! [`StructuralConflict`] then ends that worker's traversal and is counted,
//! not treated as a failure.
//!
//! Weakly-consistent containers are walked live in both modes.
//!
//! There is no ordering between traversal and mutation. Every worker runs
//! to completion and is joined before the report is built.

use std::sync::{Arc, Barrier};
use std::thread;

use failfast_concurrent::{ConcurrentMapping, ConcurrentSet};
use failfast_core::{CursorPosition, Mapping, Sequence, SetOf, StrictContainer, StructuralConflict};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{StressConfig, TraversalMode};
use crate::error::{Error, Result};
use crate::types::ContainerKind;

/// Outcome of one stress run.
#[derive(Debug, Clone, Serialize)]
pub struct StressReport {
    /// Container kind exercised
    pub kind: ContainerKind,
    /// Traversal mode requested
    pub mode: TraversalMode,
    /// Size before the mutator started
    pub initial_size: usize,
    /// Insertions that changed membership
    pub insertions: usize,
    /// Size after every worker joined
    pub final_size: usize,
    /// Elements each traversal worker visited
    pub visited: Vec<usize>,
    /// Per worker, whether a structural conflict ended its traversal
    pub interrupted: Vec<bool>,
    /// Conflicts tolerated by live strict traversal workers
    pub conflicts: usize,
}

impl StressReport {
    /// Final size equals initial size plus successful insertions
    pub fn is_consistent(&self) -> bool {
        self.final_size == self.initial_size + self.insertions
    }
}

/// Run the stress scenario for `kind`.
pub fn run(kind: ContainerKind, config: &StressConfig) -> Result<StressReport> {
    match kind {
        ContainerKind::Sequence => drive::<Mutex<Sequence<u64>>>(kind, config),
        ContainerKind::Mapping => drive::<Mutex<Mapping<u64, u64>>>(kind, config),
        ContainerKind::Set => drive::<Mutex<SetOf<u64>>>(kind, config),
        ContainerKind::ConcurrentMapping => drive::<ConcurrentMapping<u64, u64>>(kind, config),
        ContainerKind::ConcurrentSet => drive::<ConcurrentSet<u64>>(kind, config),
    }
}

/// What one traversal worker observed
#[derive(Debug, Default)]
struct WorkerOutcome {
    visited: usize,
    conflict: Option<StructuralConflict>,
}

/// A container shared between harness threads
trait StressTarget: Send + Sync + 'static {
    fn seeded(size: usize) -> Self
    where
        Self: Sized;

    /// Insert `value`; true if membership changed
    fn add(&self, value: u64) -> bool;

    fn size(&self) -> usize;

    fn traverse(&self, mode: TraversalMode, yield_between: bool) -> WorkerOutcome;
}

/// Strict containers the harness can seed and grow
trait StrictTarget: StrictContainer + Clone + Send + 'static {
    fn seeded(size: usize) -> Self;

    fn add(&self, value: u64) -> bool;
}

impl StrictTarget for Sequence<u64> {
    fn seeded(size: usize) -> Self {
        (1..=size as u64).collect()
    }

    fn add(&self, value: u64) -> bool {
        self.insert(value);
        true
    }
}

impl StrictTarget for Mapping<u64, u64> {
    fn seeded(size: usize) -> Self {
        (1..=size as u64).map(|key| (key, key)).collect()
    }

    fn add(&self, value: u64) -> bool {
        self.insert(value, value).is_none()
    }
}

impl StrictTarget for SetOf<u64> {
    fn seeded(size: usize) -> Self {
        (1..=size as u64).collect()
    }

    fn add(&self, value: u64) -> bool {
        self.insert(value)
    }
}

impl<C: StrictTarget> StressTarget for Mutex<C> {
    fn seeded(size: usize) -> Self {
        Mutex::new(C::seeded(size))
    }

    fn add(&self, value: u64) -> bool {
        self.lock().add(value)
    }

    fn size(&self) -> usize {
        self.lock().len()
    }

    fn traverse(&self, mode: TraversalMode, yield_between: bool) -> WorkerOutcome {
        match mode {
            TraversalMode::Snapshot => {
                let copy = self.lock().clone();
                let mut outcome = WorkerOutcome::default();
                for item in copy.iter() {
                    // The copy is private to this worker
                    if let Err(conflict) = item {
                        outcome.conflict = Some(conflict);
                        break;
                    }
                    outcome.visited += 1;
                    if yield_between {
                        thread::yield_now();
                    }
                }
                outcome
            }
            TraversalMode::Live => traverse_live(self, yield_between),
        }
    }
}

/// Walk the shared strict container one step per lock acquisition.
fn traverse_live<C: StrictTarget>(shared: &Mutex<C>, yield_between: bool) -> WorkerOutcome {
    let mut outcome = WorkerOutcome::default();
    let mut position: Option<CursorPosition> = None;

    loop {
        let guard = shared.lock();
        let mut cursor = match position {
            Some(position) => guard.resume(position),
            None => guard.cursor(),
        };
        if !cursor.has_next() {
            break;
        }
        match cursor.try_next() {
            Ok(Some(_)) => outcome.visited += 1,
            Ok(None) => break,
            Err(conflict) => {
                outcome.conflict = Some(conflict);
                break;
            }
        }
        position = Some(cursor.into_position());
        drop(guard);

        if yield_between {
            thread::yield_now();
        }
    }

    outcome
}

impl StressTarget for ConcurrentMapping<u64, u64> {
    fn seeded(size: usize) -> Self {
        (1..=size as u64).map(|key| (key, key)).collect()
    }

    fn add(&self, value: u64) -> bool {
        self.insert(value, value).is_none()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn traverse(&self, _mode: TraversalMode, yield_between: bool) -> WorkerOutcome {
        let mut outcome = WorkerOutcome::default();
        for _ in self.iter() {
            outcome.visited += 1;
            if yield_between {
                thread::yield_now();
            }
        }
        outcome
    }
}

impl StressTarget for ConcurrentSet<u64> {
    fn seeded(size: usize) -> Self {
        (1..=size as u64).collect()
    }

    fn add(&self, value: u64) -> bool {
        self.insert(value)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn traverse(&self, _mode: TraversalMode, yield_between: bool) -> WorkerOutcome {
        let mut outcome = WorkerOutcome::default();
        for _ in self.iter() {
            outcome.visited += 1;
            if yield_between {
                thread::yield_now();
            }
        }
        outcome
    }
}

fn drive<T: StressTarget>(kind: ContainerKind, config: &StressConfig) -> Result<StressReport> {
    let target = Arc::new(T::seeded(config.initial_size()));
    let initial_size = target.size();
    let workers = config.traversal_workers();
    let barrier = Arc::new(Barrier::new(workers + 1));

    info!(
        kind = %kind,
        initial_size,
        insertions = config.insertions(),
        workers,
        mode = ?config.mode(),
        "stress run started"
    );

    let mut traversals = Vec::with_capacity(workers);
    for n in 0..workers {
        let target = Arc::clone(&target);
        let barrier = Arc::clone(&barrier);
        let mode = config.mode();
        let yield_between = config.yield_between();
        let handle = thread::Builder::new()
            .name(format!("traversal-{}", n))
            .spawn(move || {
                barrier.wait();
                target.traverse(mode, yield_between)
            })?;
        traversals.push(handle);
    }

    let mutator = {
        let target = Arc::clone(&target);
        let barrier = Arc::clone(&barrier);
        let config = config.clone();
        thread::Builder::new()
            .name("mutator".to_string())
            .spawn(move || {
                barrier.wait();
                let mut inserted = 0usize;
                for i in 0..config.insertions() {
                    if target.add(config.insertion_value(i)) {
                        inserted += 1;
                    }
                    if config.yield_between() {
                        thread::yield_now();
                    }
                }
                debug!(inserted, "mutator finished");
                inserted
            })?
    };

    let mut visited = Vec::with_capacity(workers);
    let mut interrupted = Vec::with_capacity(workers);
    let mut conflicts = 0;
    for (n, handle) in traversals.into_iter().enumerate() {
        let outcome = handle
            .join()
            .map_err(|_| Error::WorkerPanicked(format!("traversal-{}", n)))?;
        if let Some(conflict) = outcome.conflict {
            debug!(worker = n, %conflict, "traversal ended by structural conflict");
            conflicts += 1;
        }
        debug!(worker = n, visited = outcome.visited, "traversal finished");
        visited.push(outcome.visited);
        interrupted.push(outcome.conflict.is_some());
    }
    let insertions = mutator
        .join()
        .map_err(|_| Error::WorkerPanicked("mutator".to_string()))?;

    let report = StressReport {
        kind,
        mode: config.mode(),
        initial_size,
        insertions,
        final_size: target.size(),
        visited,
        interrupted,
        conflicts,
    };
    info!(
        kind = %kind,
        final_size = report.final_size,
        conflicts = report.conflicts,
        "stress run finished"
    );
    Ok(report)
}
