//! Benchmarks for Skulk value array merge.
//!
//! Run with: cargo bench --package alopex-skulk-values
//!
//! ## Benchmark Categories
//!
//! - **Interleaved Merge**: cache writes spread through the disk range
//! - **Append Merge**: cache writes strictly after the disk range
//! - **Sizing Strategies**: worst-case vs exact output buffers
//! - **Pooled Merge**: reuse of output buffers through `ArrayPool`
//! - **Text Merge**: owned string copies

use alopex_skulk_values::{
    ArrayPool, FloatArray, OutputSizing, PoolConfig, StringArray,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const INTERVAL: i64 = 1_000_000_000; // 1 second in nanos

/// Disk-side series: regular intervals, slowly varying values.
fn generate_disk(count: usize) -> FloatArray {
    let mut value = 50.0;
    (0..count)
        .map(|i| {
            value += (i as f64 * 0.1).sin() * 0.1;
            (i as i64 * INTERVAL, value)
        })
        .collect()
}

/// Cache-side series: one point every `stride` disk points, half of them
/// colliding with disk timestamps.
fn generate_cache(count: usize, stride: usize) -> FloatArray {
    (0..count / stride)
        .map(|i| {
            let offset = if i % 2 == 0 { 0 } else { INTERVAL / 2 };
            ((i * stride) as i64 * INTERVAL + offset, i as f64)
        })
        .collect()
}

fn bench_merge_interleaved(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_interleaved");

    for size in [100, 1_000, 10_000, 100_000].iter() {
        let disk = generate_disk(*size);
        let cache = generate_cache(*size, 10);
        group.throughput(Throughput::Elements((disk.len() + cache.len()) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(disk, cache),
            |b, (disk, cache)| {
                b.iter_batched(
                    || disk.clone(),
                    |mut a| {
                        a.merge(black_box(cache));
                        a
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_merge_append(c: &mut Criterion) {
    let disk = generate_disk(10_000);
    let cache: FloatArray = (0..1_000)
        .map(|i| ((10_000 + i) as i64 * INTERVAL, i as f64))
        .collect();

    c.bench_function("merge_append_10k_1k", |b| {
        b.iter_batched(
            || disk.clone(),
            |mut a| {
                a.merge(black_box(&cache));
                a
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_merge_sizing(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_sizing");
    let disk = generate_disk(10_000);
    let cache = generate_cache(10_000, 2);

    for sizing in [OutputSizing::WorstCase, OutputSizing::Exact] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", sizing)),
            &sizing,
            |b, &sizing| {
                b.iter_batched(
                    || disk.clone(),
                    |mut a| {
                        a.try_merge(black_box(&cache), sizing).unwrap();
                        a
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_merge_pooled(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_pooled");
    let disk = generate_disk(10_000);
    let cache = generate_cache(10_000, 10);
    let pool: ArrayPool<f64> = ArrayPool::new(PoolConfig::default());

    group.bench_function("plain", |b| {
        b.iter_batched(
            || disk.clone(),
            |mut a| {
                a.merge(black_box(&cache));
                a
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("pooled", |b| {
        b.iter_batched(
            || disk.clone(),
            |mut a| {
                pool.merge(&mut a, black_box(&cache)).unwrap();
                a
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_merge_strings(c: &mut Criterion) {
    let disk: StringArray = (0..10_000)
        .map(|i| (i as i64 * INTERVAL, format!("host-{:05}", i)))
        .collect();
    let cache: StringArray = (0..1_000)
        .map(|i| ((i * 10) as i64 * INTERVAL, format!("cache-{:05}", i)))
        .collect();

    c.bench_function("merge_strings_10k_1k", |b| {
        b.iter_batched(
            || disk.clone(),
            |mut a| {
                a.merge(black_box(&cache));
                a
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_merge_interleaved,
    bench_merge_append,
    bench_merge_sizing,
    bench_merge_pooled,
    bench_merge_strings,
);

criterion_main!(benches);
