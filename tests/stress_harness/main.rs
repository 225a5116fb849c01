//! Concurrency Stress Harness Test Suite
//!
//! One mutator inserts M fresh values while traversal workers walk the same
//! shared container. After every worker joins, the container must hold
//! exactly N + M elements.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all stress tests
//! cargo test --test stress_harness
//!
//! # Weakly-consistent containers only
//! cargo test --test stress_harness concurrent::
//! ```

use failfast::harness::{self, StressReport};
use failfast::{ContainerKind, StressConfig, TraversalMode};

// Test modules
pub mod concurrent;
pub mod live;
pub mod strict;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Default scenario: N = 10000, M = 100, two snapshot workers
pub fn default_config() -> StressConfig {
    StressConfig::builder()
        .build()
        .expect("default configuration is valid")
}

/// Smaller scenario for repeated runs
pub fn small_config(mode: TraversalMode) -> StressConfig {
    StressConfig::builder()
        .initial_size(500)
        .insertions(50)
        .traversal_workers(3)
        .mode(mode)
        .build()
        .expect("small configuration is valid")
}

/// Run and assert the cardinality invariant
pub fn run_consistent(kind: ContainerKind, config: &StressConfig) -> StressReport {
    let report = harness::run(kind, config).expect("stress run failed");
    assert_eq!(
        report.final_size,
        config.initial_size() + config.insertions(),
        "{}: {:?}",
        kind,
        report
    );
    assert!(report.is_consistent());
    assert_eq!(report.visited.len(), config.traversal_workers());
    report
}
