// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use halyard_sort::{sort, SortConfig};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::hint::black_box;
use std::num::NonZeroUsize;

/// Deterministic, evenly distributed fill; cheap enough to regenerate per
/// iteration.
fn pseudo_random_fill(n: usize) -> Vec<i64> {
    (0..n).map(|i| ((i * 37 + 19) % n.max(1)) as i64).collect()
}

fn shuffled_fill(n: usize) -> Vec<i64> {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    let mut v: Vec<i64> = (0..n as i64).collect();
    v.shuffle(&mut rng);
    v
}

fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn bench_worker_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort/pseudo_random");
    let size = 1_000_000usize;
    group.throughput(Throughput::Elements(size as u64));

    for workers in [1, available_workers()] {
        let config = SortConfig::builder().worker_count(workers).build();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}w", workers)),
            &config,
            |b, config| {
                b.iter_batched(
                    || pseudo_random_fill(size),
                    |mut v| {
                        sort(black_box(&mut v), config).expect("bench sort failed");
                        v
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_thresholds(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort/threshold");
    let size = 500_000usize;
    let workers = available_workers();
    group.throughput(Throughput::Elements(size as u64));

    for threshold in [1_000usize, 10_000, 100_000] {
        let config = SortConfig::builder()
            .threshold(threshold)
            .worker_count(workers)
            .build();
        group.bench_with_input(
            BenchmarkId::from_parameter(threshold),
            &config,
            |b, config| {
                b.iter_batched(
                    || shuffled_fill(size),
                    |mut v| {
                        sort(black_box(&mut v), config).expect("bench sort failed");
                        v
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_worker_counts, bench_thresholds);
criterion_main!(benches);
