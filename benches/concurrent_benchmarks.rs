//! Concurrent Cache Benchmarks
//!
//! Measures the single-lock cache under read, write and mixed contention.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use eviction_cache::ConcurrentEvictionCache;
use std::sync::Arc;
use std::thread;

const CACHE_SIZE: usize = 10_000;
const OPS_PER_THREAD: usize = 1_000;

fn filled_cache() -> Arc<ConcurrentEvictionCache<usize, usize>> {
    let cache = Arc::new(ConcurrentEvictionCache::new(CACHE_SIZE));
    for i in 0..CACHE_SIZE {
        cache.put(i, i);
    }
    cache
}

fn run_threads<F>(cache: &Arc<ConcurrentEvictionCache<usize, usize>>, num_threads: usize, op: F)
where
    F: Fn(&ConcurrentEvictionCache<usize, usize>, usize, usize) + Send + Sync + Copy + 'static,
{
    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let cache = Arc::clone(cache);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    op(&cache, t, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

fn concurrent_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Reads");
    let cache = filled_cache();

    for threads in [1usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &n| {
            b.iter(|| {
                run_threads(&cache, n, |cache, t, i| {
                    black_box(cache.get(&((t * OPS_PER_THREAD + i) % CACHE_SIZE)));
                });
            });
        });
    }

    group.finish();
}

fn concurrent_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Writes");
    let cache = filled_cache();

    for threads in [1usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &n| {
            b.iter(|| {
                // Keys beyond CACHE_SIZE force an eviction per put
                run_threads(&cache, n, |cache, t, i| {
                    let key = CACHE_SIZE + t * OPS_PER_THREAD + i;
                    black_box(cache.put(key, key));
                });
            });
        });
    }

    group.finish();
}

fn concurrent_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Mixed");
    group.throughput(Throughput::Elements((8 * OPS_PER_THREAD) as u64));
    let cache = filled_cache();

    group.bench_function("80% get / 20% put", |b| {
        b.iter(|| {
            run_threads(&cache, 8, |cache, t, i| {
                let key = (t * 7919 + i * 31) % (CACHE_SIZE * 2);
                if i % 5 == 0 {
                    black_box(cache.put(key, i));
                } else {
                    black_box(cache.get(&key));
                }
            });
        });
    });

    group.finish();
}

criterion_group!(benches, concurrent_reads, concurrent_writes, concurrent_mixed);
criterion_main!(benches);
