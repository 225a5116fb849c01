//! Strict containers traversed live under a lock.
//!
//! Workers may be cut short by a structural conflict; the harness counts the
//! conflict and the cardinality invariant still holds.

use crate::*;

#[test]
fn live_traversal_keeps_cardinality() {
    let config = small_config(TraversalMode::Live);
    for kind in ContainerKind::STRICT {
        let report = run_consistent(kind, &config);
        assert!(report.conflicts <= config.traversal_workers());
    }
}

#[test]
fn uninterrupted_live_worker_visits_every_initial_element() {
    let config = small_config(TraversalMode::Live);
    for kind in ContainerKind::STRICT {
        let report = run_consistent(kind, &config);
        assert_eq!(report.interrupted.len(), config.traversal_workers());
        assert_eq!(
            report.interrupted.iter().filter(|i| **i).count(),
            report.conflicts
        );
        for (visited, interrupted) in report.visited.iter().zip(&report.interrupted) {
            if !interrupted {
                assert!(
                    *visited >= config.initial_size(),
                    "{}: uninterrupted worker visited {}",
                    kind,
                    visited
                );
            }
        }
    }
}

#[test]
fn live_without_insertions_never_conflicts() {
    let config = StressConfig::builder()
        .initial_size(200)
        .insertions(0)
        .live()
        .build()
        .unwrap();
    for kind in ContainerKind::STRICT {
        let report = run_consistent(kind, &config);
        assert_eq!(report.conflicts, 0, "{}", kind);
        assert!(report.visited.iter().all(|v| *v == 200));
    }
}
