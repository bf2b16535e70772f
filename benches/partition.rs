//! Partitioning Benchmarks
//!
//! Compares the two shortest-path strategies and sequential against parallel
//! segment scoring as the number of tags grows.
//!
//! # Running Benchmarks
//! ```bash
//! cargo bench --bench partition
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use clip_partition::{
    config::{Config, PartitionConfig, SolverConfig},
    Partitioner, SolverStrategy, TagSet,
};

const NO_FRAMES: u64 = 10_000;

/// Deterministic, overlapping tag layout with `count` intervals
fn synthetic_tags(count: u64) -> TagSet {
    const LABELS: [&str; 5] = ["person", "car", "dog", "bird", "boat"];

    (0..count)
        .map(|i| {
            let start = (i * 7919) % (NO_FRAMES - 200);
            let length = 10 + (i * 104_729) % 190;
            (LABELS[(i % 5) as usize], start, start + length)
        })
        .collect()
}

fn partitioner(strategy: SolverStrategy, parallel: bool) -> Partitioner {
    Partitioner::new(Config {
        partition: PartitionConfig {
            penalty: 20.0,
            ..PartitionConfig::default()
        },
        solver: SolverConfig {
            strategy,
            parallel,
            parallel_threshold: 0,
            ..SolverConfig::default()
        },
    })
    .expect("benchmark configuration is valid")
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver_strategy");

    for count in [25u64, 100, 250] {
        let tags = synthetic_tags(count);

        for strategy in [SolverStrategy::Topological, SolverStrategy::Dijkstra] {
            let partitioner = partitioner(strategy, false);
            group.bench_with_input(BenchmarkId::new(strategy.to_string(), count), &tags, |b, tags| {
                b.iter(|| partitioner.partition(black_box(tags), NO_FRAMES).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_scoring");
    group.sample_size(20);

    for count in [100u64, 400] {
        let tags = synthetic_tags(count);

        for (name, parallel) in [("sequential", false), ("parallel", true)] {
            let partitioner = partitioner(SolverStrategy::Topological, parallel);
            group.bench_with_input(BenchmarkId::new(name, count), &tags, |b, tags| {
                b.iter(|| partitioner.partition(black_box(tags), NO_FRAMES).unwrap())
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_scoring);
criterion_main!(benches);
