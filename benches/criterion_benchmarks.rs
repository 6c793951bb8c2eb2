use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eviction_cache::config::EvictionCacheConfig;
use eviction_cache::EvictionCache;

fn make_cache<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> EvictionCache<K, V> {
    EvictionCache::init(EvictionCacheConfig::new(cap), None)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    let mut group = c.benchmark_group("Cache Operations");

    {
        let mut cache = make_cache(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.put(i % CACHE_SIZE, i));
                }
            });
        });
    }

    {
        let mut cache = make_cache(CACHE_SIZE);
        let mut next = 0usize;

        group.bench_function("put with eviction", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    black_box(cache.put(next, next));
                    next += 1;
                }
            });
        });
    }

    group.finish();
}

/// Per-call cost should grow logarithmically with the number of entries.
pub fn scaling_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scaling");

    for size in [1_000usize, 10_000, 100_000] {
        let mut cache = make_cache(size);
        for i in 0..size {
            cache.put(i, i);
        }
        let mut next = size;

        group.bench_with_input(BenchmarkId::new("get hit", size), &size, |b, &size| {
            let mut i = 0usize;
            b.iter(|| {
                black_box(cache.get(&(i % size)));
                i = i.wrapping_add(7919);
            });
        });

        group.bench_with_input(BenchmarkId::new("put evict", size), &size, |b, _| {
            b.iter(|| {
                black_box(cache.put(next, next));
                next += 1;
            });
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark, scaling_benchmark);
criterion_main!(benches);
