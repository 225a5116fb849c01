//! Weakly-consistent containers traversed live by every worker.

use crate::*;

#[test]
fn concurrent_mapping_reaches_n_plus_m() {
    let config = default_config();
    let report = run_consistent(ContainerKind::ConcurrentMapping, &config);
    assert_eq!(report.final_size, 10_100);
    assert_eq!(report.conflicts, 0);
}

#[test]
fn concurrent_set_reaches_n_plus_m() {
    let config = default_config();
    let report = run_consistent(ContainerKind::ConcurrentSet, &config);
    assert_eq!(report.final_size, 10_100);
    assert_eq!(report.conflicts, 0);
}

#[test]
fn live_workers_see_every_stable_element() {
    // Values 1..=N are never removed, so every worker visits at least N;
    // concurrent insertions add at most M more
    let config = small_config(TraversalMode::Snapshot);
    for kind in [ContainerKind::ConcurrentMapping, ContainerKind::ConcurrentSet] {
        let report = run_consistent(kind, &config);
        for visited in &report.visited {
            assert!(
                (500..=550).contains(visited),
                "{}: worker visited {}",
                kind,
                visited
            );
        }
        assert!(report.interrupted.iter().all(|i| !i));
    }
}

#[test]
fn mode_does_not_matter_for_weak_containers() {
    for mode in [TraversalMode::Snapshot, TraversalMode::Live] {
        let config = small_config(mode);
        let report = run_consistent(ContainerKind::ConcurrentSet, &config);
        assert_eq!(report.conflicts, 0);
    }
}
