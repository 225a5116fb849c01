//! Cursor Traversal Benchmarks
//!
//! ## What These Benchmarks Measure
//!
//! | Benchmark | Path | Regression Detection |
//! |-----------|------|----------------------|
//! | strict_traversal/* | Counter check + clone per advance | RefCell/IndexMap overhead |
//! | weak_traversal/* | Read lock + range lookup per advance | BTreeMap/RwLock overhead |
//! | cursor_remove/* | Removal through the cursor | shift_remove cost |
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench cursor_traversal
//! cargo bench --bench cursor_traversal -- "weak_traversal"
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use failfast::prelude::*;

const SIZES: [u64; 3] = [100, 1_000, 10_000];

// =============================================================================
// Strict containers
// =============================================================================

fn strict_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("strict_traversal");

    for size in SIZES {
        group.throughput(Throughput::Elements(size));

        let sequence: Sequence<u64> = (0..size).collect();
        group.bench_with_input(BenchmarkId::new("sequence", size), &sequence, |b, seq| {
            b.iter(|| {
                let mut sum = 0u64;
                for item in seq.iter() {
                    sum += black_box(item.unwrap());
                }
                sum
            })
        });

        let mapping: Mapping<u64, u64> = (0..size).map(|k| (k, k)).collect();
        group.bench_with_input(BenchmarkId::new("mapping", size), &mapping, |b, map| {
            b.iter(|| {
                let mut sum = 0u64;
                for item in map.iter() {
                    sum += black_box(item.unwrap().1);
                }
                sum
            })
        });

        let set: SetOf<u64> = (0..size).collect();
        group.bench_with_input(BenchmarkId::new("set", size), &set, |b, set| {
            b.iter(|| set.iter().filter(|item| item.is_ok()).count())
        });
    }

    group.finish();
}

// =============================================================================
// Weakly-consistent containers
// =============================================================================

fn weak_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("weak_traversal");

    for size in SIZES {
        group.throughput(Throughput::Elements(size));

        let mapping: ConcurrentMapping<u64, u64> = (0..size).map(|k| (k, k)).collect();
        group.bench_with_input(BenchmarkId::new("mapping", size), &mapping, |b, map| {
            b.iter(|| map.iter().map(|(_, v)| black_box(v)).sum::<u64>())
        });

        let set: ConcurrentSet<u64> = (0..size).collect();
        group.bench_with_input(BenchmarkId::new("set", size), &set, |b, set| {
            b.iter(|| set.iter().count())
        });
    }

    group.finish();
}

// =============================================================================
// Removal through the cursor
// =============================================================================

fn cursor_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor_remove");

    for size in SIZES {
        group.throughput(Throughput::Elements(size));

        group.bench_function(BenchmarkId::new("sequence_every_other", size), |b| {
            b.iter_batched(
                || (0..size).collect::<Sequence<u64>>(),
                |seq| {
                    let mut cursor = seq.cursor();
                    while let Ok(Some(value)) = cursor.try_next() {
                        if value % 2 == 0 {
                            let _ = cursor.remove();
                        }
                    }
                    seq.len()
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(BenchmarkId::new("set_every_other", size), |b| {
            b.iter_batched(
                || (0..size).collect::<SetOf<u64>>(),
                |set| {
                    let mut cursor = set.cursor();
                    while let Ok(Some(value)) = cursor.try_next() {
                        if value % 2 == 0 {
                            let _ = cursor.remove();
                        }
                    }
                    set.len()
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, strict_traversal, weak_traversal, cursor_remove);
criterion_main!(benches);
