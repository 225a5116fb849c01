//! Strict containers with snapshot traversal workers.

use crate::*;

#[test]
fn sequence_reaches_n_plus_m() {
    let config = default_config();
    let report = run_consistent(ContainerKind::Sequence, &config);
    assert_eq!(report.final_size, 10_100);
    assert_eq!(report.insertions, 100);
}

#[test]
fn mapping_reaches_n_plus_m() {
    let config = default_config();
    let report = run_consistent(ContainerKind::Mapping, &config);
    assert_eq!(report.final_size, 10_100);
}

#[test]
fn set_reaches_n_plus_m() {
    let config = default_config();
    let report = run_consistent(ContainerKind::Set, &config);
    assert_eq!(report.final_size, 10_100);
}

#[test]
fn snapshot_workers_never_conflict() {
    let config = small_config(TraversalMode::Snapshot);
    for kind in ContainerKind::STRICT {
        let report = run_consistent(kind, &config);
        assert_eq!(report.conflicts, 0, "{}", kind);
    }
}

#[test]
fn snapshot_workers_see_a_whole_copy() {
    let config = small_config(TraversalMode::Snapshot);
    for kind in ContainerKind::STRICT {
        let report = run_consistent(kind, &config);
        for visited in &report.visited {
            assert!(
                (500..=550).contains(visited),
                "{}: worker visited {}",
                kind,
                visited
            );
        }
    }
}

#[test]
fn repeated_runs_stay_consistent() {
    let config = StressConfig::builder()
        .initial_size(100)
        .insertions(20)
        .build()
        .unwrap();
    for _ in 0..20 {
        for kind in ContainerKind::STRICT {
            run_consistent(kind, &config);
        }
    }
}
