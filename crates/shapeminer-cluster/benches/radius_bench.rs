//! Criterion benchmarks for shapeminer-cluster: radius clustering of candidate pools.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use shapeminer_cluster::RadiusClustering;

/// Noisy copies of a handful of sine prototypes, the shape of a real pool.
fn make_pool(n: usize, len: usize) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            let phase = (i % 8) as f64 * 0.7;
            (0..len)
                .map(|t| (t as f64 * 0.3 + phase).sin() + rng.gen_range(-0.05..0.05))
                .collect()
        })
        .collect()
}

fn bench_radius_fit(c: &mut Criterion) {
    let cfg = RadiusClustering::new(0.6).unwrap();
    let mut group = c.benchmark_group("radius_fit");
    for n in [100usize, 400, 1000] {
        let pool = make_pool(n, 32);
        group.bench_with_input(BenchmarkId::from_parameter(n), &pool, |b, pool| {
            b.iter(|| cfg.fit(pool).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_radius_fit);
criterion_main!(benches);
