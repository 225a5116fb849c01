//! Scripted demonstration of fail-fast traversal.
//!
//! The same deterministic script runs against every container kind:
//!
//! 1. Populate with labels 1 through 5 and list them.
//! 2. For-each passes: remove label 3 on every step, then insert label 6 on
//!    every step.
//! 3. Explicit-cursor passes: remove label 2 on every step, then insert
//!    label 3 on every step.
//! 4. List the final contents; labels {1, 3, 4, 5, 6} remain.
//!
//! Every pass obtains a fresh cursor. On a strict container the first step's
//! mutation succeeds and the following advance reports a
//! [`StructuralConflict`](failfast_core::StructuralConflict); the pass
//! catches it, logs it and records it in the report. Repeated removals of an
//! already absent label are no-ops, which is why the outcome is the same no
//! matter how many steps a pass manages. Weakly-consistent containers finish
//! every pass without conflict.
//!
//! Conflicts never escape a demonstration.

use failfast_concurrent::{ConcurrentMapping, ConcurrentSet};
use failfast_core::{Mapping, Sequence, SetOf, StrictContainer};
use tracing::{debug, info, trace, warn};

use crate::types::{ConflictEvent, ContainerKind, DemonstrationReport, Operation, TraversalStyle};

/// Labels the script starts with
const INITIAL_LABELS: usize = 5;

/// Run every strict demonstration: sequence, mapping, then set.
pub fn run_all() -> Vec<DemonstrationReport> {
    trace!("running all demonstrations");
    ContainerKind::STRICT.into_iter().map(run).collect()
}

/// Run the demonstration for one container kind.
pub fn run(kind: ContainerKind) -> DemonstrationReport {
    match kind {
        ContainerKind::Sequence => Script::new(kind, Sequence::<String>::new()).run(),
        ContainerKind::Mapping => Script::new(kind, Mapping::<String, String>::new()).run(),
        ContainerKind::Set => Script::new(kind, SetOf::<String>::new()).run(),
        ContainerKind::ConcurrentMapping => {
            Script::new(kind, ConcurrentMapping::<String, String>::new()).run()
        }
        ContainerKind::ConcurrentSet => Script::new(kind, ConcurrentSet::<String>::new()).run(),
    }
}

/// A container the script can drive through string labels.
trait Subject {
    /// Label text without its ordinal ("value", "key")
    const PREFIX: &'static str;

    fn insert_label(&self, ordinal: usize);

    fn remove_label(&self, ordinal: usize);

    /// Run one pass, calling `visit` with each element's label.
    fn traverse(
        &self,
        style: TraversalStyle,
        visit: &mut dyn FnMut(String),
    ) -> failfast_core::Result<()>;

    /// Current labels in traversal order
    fn labels(&self) -> Vec<String>;

    fn label(ordinal: usize) -> String {
        format!("{}{}", Self::PREFIX, ordinal)
    }

    fn ordinal(label: &str) -> Option<usize> {
        label.strip_prefix(Self::PREFIX)?.parse().ok()
    }
}

fn traverse_strict<C>(
    container: &C,
    style: TraversalStyle,
    label: fn(C::Item) -> String,
    visit: &mut dyn FnMut(String),
) -> failfast_core::Result<()>
where
    C: StrictContainer,
{
    match style {
        TraversalStyle::ForEach => {
            for item in container.iter() {
                visit(label(item?));
            }
        }
        TraversalStyle::Explicit => {
            let mut cursor = container.cursor();
            while cursor.has_next() {
                match cursor.try_next()? {
                    Some(item) => visit(label(item)),
                    None => break,
                }
            }
        }
    }
    Ok(())
}

impl Subject for Sequence<String> {
    const PREFIX: &'static str = "value";

    fn insert_label(&self, ordinal: usize) {
        self.insert(Self::label(ordinal));
    }

    fn remove_label(&self, ordinal: usize) {
        self.remove(&Self::label(ordinal));
    }

    fn traverse(
        &self,
        style: TraversalStyle,
        visit: &mut dyn FnMut(String),
    ) -> failfast_core::Result<()> {
        traverse_strict(self, style, |value| value, visit)
    }

    fn labels(&self) -> Vec<String> {
        self.to_vec()
    }
}

impl Subject for Mapping<String, String> {
    const PREFIX: &'static str = "key";

    fn insert_label(&self, ordinal: usize) {
        self.insert(Self::label(ordinal), format!("value{}", ordinal));
    }

    fn remove_label(&self, ordinal: usize) {
        self.remove(&Self::label(ordinal));
    }

    fn traverse(
        &self,
        style: TraversalStyle,
        visit: &mut dyn FnMut(String),
    ) -> failfast_core::Result<()> {
        traverse_strict(self, style, |(key, _)| key, visit)
    }

    fn labels(&self) -> Vec<String> {
        self.keys()
    }
}

impl Subject for SetOf<String> {
    const PREFIX: &'static str = "value";

    fn insert_label(&self, ordinal: usize) {
        self.insert(Self::label(ordinal));
    }

    fn remove_label(&self, ordinal: usize) {
        self.remove(&Self::label(ordinal));
    }

    fn traverse(
        &self,
        style: TraversalStyle,
        visit: &mut dyn FnMut(String),
    ) -> failfast_core::Result<()> {
        traverse_strict(self, style, |value| value, visit)
    }

    fn labels(&self) -> Vec<String> {
        self.to_vec()
    }
}

impl Subject for ConcurrentMapping<String, String> {
    const PREFIX: &'static str = "key";

    fn insert_label(&self, ordinal: usize) {
        self.insert(Self::label(ordinal), format!("value{}", ordinal));
    }

    fn remove_label(&self, ordinal: usize) {
        self.remove(&Self::label(ordinal));
    }

    fn traverse(
        &self,
        style: TraversalStyle,
        visit: &mut dyn FnMut(String),
    ) -> failfast_core::Result<()> {
        match style {
            TraversalStyle::ForEach => {
                for (key, _) in self.iter() {
                    visit(key);
                }
            }
            TraversalStyle::Explicit => {
                let mut cursor = self.cursor();
                while cursor.has_next() {
                    match cursor.next_entry() {
                        Some((key, _)) => visit(key),
                        None => break,
                    }
                }
            }
        }
        Ok(())
    }

    fn labels(&self) -> Vec<String> {
        self.keys()
    }
}

impl Subject for ConcurrentSet<String> {
    const PREFIX: &'static str = "value";

    fn insert_label(&self, ordinal: usize) {
        self.insert(Self::label(ordinal));
    }

    fn remove_label(&self, ordinal: usize) {
        self.remove(&Self::label(ordinal));
    }

    fn traverse(
        &self,
        style: TraversalStyle,
        visit: &mut dyn FnMut(String),
    ) -> failfast_core::Result<()> {
        match style {
            TraversalStyle::ForEach => {
                for value in self.iter() {
                    visit(value);
                }
            }
            TraversalStyle::Explicit => {
                let mut cursor = self.cursor();
                while cursor.has_next() {
                    match cursor.next() {
                        Some(value) => visit(value),
                        None => break,
                    }
                }
            }
        }
        Ok(())
    }

    fn labels(&self) -> Vec<String> {
        self.to_vec()
    }
}

struct Script<S> {
    kind: ContainerKind,
    subject: S,
    conflicts: Vec<ConflictEvent>,
}

impl<S: Subject> Script<S> {
    fn new(kind: ContainerKind, subject: S) -> Self {
        Self {
            kind,
            subject,
            conflicts: Vec::new(),
        }
    }

    fn run(mut self) -> DemonstrationReport {
        trace!(kind = %self.kind, "demonstration started");

        for ordinal in 1..=INITIAL_LABELS {
            self.subject.insert_label(ordinal);
        }

        // Removes 3 and adds 6
        self.list(TraversalStyle::ForEach);
        self.attempt(TraversalStyle::ForEach, Operation::Remove, 3);
        self.attempt(TraversalStyle::ForEach, Operation::Insert, 6);

        // Removes 2 and adds 3 back
        self.list(TraversalStyle::Explicit);
        self.attempt(TraversalStyle::Explicit, Operation::Remove, 2);
        self.attempt(TraversalStyle::Explicit, Operation::Insert, 3);

        self.list(TraversalStyle::ForEach);

        let contents = self.subject.labels();
        let ordinals = contents.iter().filter_map(|l| S::ordinal(l)).collect();
        trace!(kind = %self.kind, conflicts = self.conflicts.len(), "demonstration finished");

        DemonstrationReport {
            kind: self.kind,
            conflicts: self.conflicts,
            contents,
            ordinals,
        }
    }

    /// Log every element without mutating.
    fn list(&mut self, style: TraversalStyle) {
        let kind = self.kind;
        let mut visit = |label: String| info!(kind = %kind, element = %label, "element");
        if let Err(conflict) = self.subject.traverse(style, &mut visit) {
            // Nothing mutates during a listing; a conflict here is a bug
            warn!(kind = %kind, %conflict, "unexpected conflict while listing");
        }
    }

    /// One pass that mutates the container on every step.
    fn attempt(&mut self, style: TraversalStyle, operation: Operation, ordinal: usize) {
        let kind = self.kind;
        let subject = &self.subject;
        let mut steps = 0usize;
        let mut visit = |label: String| {
            steps += 1;
            debug!(kind = %kind, element = %label, ?operation, ordinal, "step");
            match operation {
                Operation::Remove => subject.remove_label(ordinal),
                Operation::Insert => subject.insert_label(ordinal),
            }
        };

        let outcome = subject.traverse(style, &mut visit);
        match outcome {
            Ok(()) => {
                debug!(kind = %kind, ?style, ?operation, steps, "pass completed");
            }
            Err(conflict) => {
                warn!(
                    kind = %kind,
                    ?style,
                    ?operation,
                    expected = conflict.expected,
                    actual = conflict.actual,
                    "structural conflict during traversal"
                );
                self.conflicts.push(ConflictEvent {
                    style,
                    operation,
                    label: S::label(ordinal),
                    expected: conflict.expected,
                    actual: conflict.actual,
                });
            }
        }
    }
}
