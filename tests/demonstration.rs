//! Scripted demonstration tests
//!
//! Runs the mutate-during-traversal script against every container kind and
//! checks the conflicts it catches and the contents it leaves behind, then
//! pins down the cursor rules the script relies on.
//!
//! ```bash
//! cargo test --test demonstration
//! ```

use std::collections::BTreeSet;

use failfast::demonstration;
use failfast::{
    ContainerKind, Mapping, Operation, Sequence, SetOf, StrictContainer, TraversalStyle,
};
use proptest::prelude::*;

fn expected_ordinals() -> BTreeSet<usize> {
    [1, 3, 4, 5, 6].into_iter().collect()
}

// =============================================================================
// Full script
// =============================================================================

#[test]
fn every_kind_ends_with_the_same_members() {
    for kind in ContainerKind::ALL {
        let report = demonstration::run(kind);
        assert_eq!(report.ordinal_set(), expected_ordinals(), "{}", kind);
        assert_eq!(report.ordinals.len(), 5, "{} has duplicates", kind);
    }
}

#[test]
fn sequence_order_after_script() {
    let report = demonstration::run(ContainerKind::Sequence);
    assert_eq!(report.ordinals, vec![1, 4, 5, 6, 3]);
    assert_eq!(
        report.contents,
        vec!["value1", "value4", "value5", "value6", "value3"]
    );
}

#[test]
fn mapping_keeps_insertion_order_and_key_labels() {
    let report = demonstration::run(ContainerKind::Mapping);
    assert_eq!(report.contents, vec!["key1", "key4", "key5", "key6", "key3"]);
}

#[test]
fn concurrent_mapping_is_key_ordered() {
    let report = demonstration::run(ContainerKind::ConcurrentMapping);
    assert_eq!(report.contents, vec!["key1", "key3", "key4", "key5", "key6"]);
}

#[test]
fn strict_kinds_catch_one_conflict_per_mutating_pass() {
    for kind in ContainerKind::STRICT {
        let report = demonstration::run(kind);
        let passes: Vec<(TraversalStyle, Operation, usize)> = report
            .conflicts
            .iter()
            .map(|event| {
                let ordinal = event
                    .label
                    .trim_start_matches(|c: char| !c.is_ascii_digit())
                    .parse()
                    .unwrap();
                (event.style, event.operation, ordinal)
            })
            .collect();
        assert_eq!(
            passes,
            vec![
                (TraversalStyle::ForEach, Operation::Remove, 3),
                (TraversalStyle::ForEach, Operation::Insert, 6),
                (TraversalStyle::Explicit, Operation::Remove, 2),
                (TraversalStyle::Explicit, Operation::Insert, 3),
            ],
            "{}",
            kind
        );
    }
}

#[test]
fn conflicts_report_the_counter_values() {
    // Five initial inserts, then one mutation per pass
    let report = demonstration::run(ContainerKind::Sequence);
    let counters: Vec<(u64, u64)> = report
        .conflicts
        .iter()
        .map(|event| (event.expected, event.actual))
        .collect();
    assert_eq!(counters, vec![(5, 6), (6, 7), (7, 8), (8, 9)]);
}

#[test]
fn weakly_consistent_kinds_never_conflict() {
    for kind in [ContainerKind::ConcurrentMapping, ContainerKind::ConcurrentSet] {
        let report = demonstration::run(kind);
        assert!(report.conflicts.is_empty(), "{}", kind);
    }
}

#[test]
fn run_all_covers_strict_kinds_in_order() {
    let kinds: Vec<ContainerKind> = demonstration::run_all()
        .into_iter()
        .map(|report| report.kind)
        .collect();
    assert_eq!(kinds, ContainerKind::STRICT.to_vec());
}

// =============================================================================
// Fresh cursor per pass vs one cursor for both passes
// =============================================================================

/// Labelled container plus the two mutations the passes perform.
struct TwoPassCase<C> {
    container: C,
    remove_three: fn(&C),
    insert_six: fn(&C),
    has_six: fn(&C) -> bool,
}

/// Remove label 3 on the first step, then insert label 6 on the first step
/// of a second pass. Returns whether the insertion happened.
fn two_passes<C: StrictContainer>(case: &TwoPassCase<C>, cursor_per_pass: bool) -> bool {
    let mut cursor = case.container.cursor();
    if let Ok(Some(_)) = cursor.try_next() {
        (case.remove_three)(&case.container);
    }
    assert!(cursor.try_next().is_err());

    if cursor_per_pass {
        cursor = case.container.cursor();
    }
    match cursor.try_next() {
        Ok(Some(_)) => {
            (case.insert_six)(&case.container);
            true
        }
        _ => false,
    }
}

fn labels() -> impl Iterator<Item = String> {
    (1..=5).map(|n| format!("value{}", n))
}

fn sequence_case() -> TwoPassCase<Sequence<String>> {
    TwoPassCase {
        container: labels().collect(),
        remove_three: |seq| {
            seq.remove(&"value3".to_string());
        },
        insert_six: |seq| seq.insert("value6".to_string()),
        has_six: |seq| seq.contains(&"value6".to_string()),
    }
}

fn mapping_case() -> TwoPassCase<Mapping<String, String>> {
    TwoPassCase {
        container: labels().map(|label| (label.clone(), label)).collect(),
        remove_three: |map| {
            map.remove("value3");
        },
        insert_six: |map| {
            map.insert("value6".to_string(), "value6".to_string());
        },
        has_six: |map| map.contains_key("value6"),
    }
}

fn set_case() -> TwoPassCase<SetOf<String>> {
    TwoPassCase {
        container: labels().collect(),
        remove_three: |set| {
            set.remove("value3");
        },
        insert_six: |set| {
            set.insert("value6".to_string());
        },
        has_six: |set| set.contains("value6"),
    }
}

/// Both arms of the cursor-per-pass dimension for one container kind.
fn assert_cursor_per_pass_dimension<C: StrictContainer>(
    kind: ContainerKind,
    make: fn() -> TwoPassCase<C>,
) {
    for cursor_per_pass in [true, false] {
        let case = make();
        let inserted = two_passes(&case, cursor_per_pass);
        assert_eq!(inserted, cursor_per_pass, "{} per_pass={}", kind, cursor_per_pass);
        assert_eq!(
            (case.has_six)(&case.container),
            cursor_per_pass,
            "{} per_pass={}",
            kind,
            cursor_per_pass
        );
        assert_eq!(case.container.len(), if cursor_per_pass { 5 } else { 4 });
    }
}

#[test]
fn sequence_cursor_per_pass_dimension() {
    assert_cursor_per_pass_dimension(ContainerKind::Sequence, sequence_case);
}

#[test]
fn mapping_cursor_per_pass_dimension() {
    assert_cursor_per_pass_dimension(ContainerKind::Mapping, mapping_case);
}

#[test]
fn set_cursor_per_pass_dimension() {
    assert_cursor_per_pass_dimension(ContainerKind::Set, set_case);
}

// =============================================================================
// Cursor rules
// =============================================================================

#[test]
fn mutation_without_cursor_never_conflicts() {
    let sequence = Sequence::new();
    let mapping = Mapping::new();
    let set = SetOf::new();
    for n in 0..10u32 {
        sequence.insert(n);
        mapping.insert(n, n);
        set.insert(n);
    }
    sequence.remove(&3);
    mapping.remove(&3);
    set.remove(&3);
    assert_eq!(sequence.len(), 9);
    assert_eq!(mapping.len(), 9);
    assert_eq!(set.len(), 9);
}

#[test]
fn mutation_through_other_handle_conflicts() {
    let mapping: Mapping<u32, &str> = [(1, "a"), (2, "b")].into_iter().collect();
    let mut cursor = mapping.cursor();
    mapping.insert(3, "c");
    let err = cursor.try_next().unwrap_err();
    assert_eq!(err.missed(), 1);
}

#[test]
fn value_update_is_not_structural() {
    let mapping: Mapping<u32, &str> = [(1, "a"), (2, "b")].into_iter().collect();
    let mut cursor = mapping.cursor();
    mapping.insert(2, "z");
    assert_eq!(cursor.try_next().unwrap(), Some((1, "a")));
    assert_eq!(cursor.try_next().unwrap(), Some((2, "z")));
}

#[test]
fn own_mutations_never_trip_the_cursor() {
    let sequence: Sequence<u32> = (1..=4).collect();
    let mut cursor = sequence.cursor();
    while let Some(value) = cursor.try_next().unwrap() {
        if value % 2 == 0 {
            cursor.remove().unwrap();
        }
    }
    assert_eq!(sequence.to_vec(), vec![1, 3]);

    let mut cursor = sequence.cursor();
    cursor.try_next().unwrap();
    cursor.insert(2).unwrap();
    assert_eq!(cursor.try_next().unwrap(), Some(3));
    assert_eq!(sequence.to_vec(), vec![1, 2, 3]);
}

#[test]
fn repeated_removal_of_absent_value_is_noop() {
    let set: SetOf<&str> = ["a", "b"].into_iter().collect();
    assert!(set.remove("a"));
    let after_first = set.modification_count();
    assert!(!set.remove("a"));
    assert!(!set.remove("a"));
    assert_eq!(set.modification_count(), after_first);

    let mapping: Mapping<&str, u8> = [("k", 1)].into_iter().collect();
    assert_eq!(mapping.remove("k"), Some(1));
    assert_eq!(mapping.remove("k"), None);
    assert_eq!(mapping.modification_count(), 1);
}

proptest! {
    #[test]
    fn prop_external_insert_always_conflicts(
        initial in prop::collection::vec(0u32..1000, 1..40),
        advance in 0usize..40,
        extra in 1000u32..2000,
    ) {
        let sequence: Sequence<u32> = initial.iter().copied().collect();
        let mut cursor = sequence.cursor();
        for _ in 0..advance.min(initial.len()) {
            prop_assert!(cursor.try_next().is_ok());
        }
        sequence.insert(extra);
        prop_assert!(cursor.try_next().is_err());
    }

    #[test]
    fn prop_cursor_removal_leaves_cursor_valid(
        initial in prop::collection::btree_set(0u32..500, 1..40),
        modulus in 2u32..5,
    ) {
        let set: SetOf<u32> = initial.iter().copied().collect();
        let mut cursor = set.cursor();
        let mut visited = 0;
        while let Some(value) = cursor.try_next().unwrap() {
            visited += 1;
            if value % modulus == 0 {
                prop_assert!(cursor.remove().unwrap().is_some());
            }
        }
        prop_assert_eq!(visited, initial.len());
        prop_assert!(set.to_vec().iter().all(|v| v % modulus != 0));
    }
}
