//! Criterion benchmarks for shapeminer-search: full shapelet discovery runs.

use std::collections::BTreeSet;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use shapeminer_search::{ShapeletConfig, TrainingSet};
use shapeminer_series::{Label, TimeSeries};

/// Noisy rising (label "up") or falling (label "down") sawtooth series on two
/// axes, with every fifth series left unlabeled as background.
fn make_set(n_series: usize, len: usize) -> TrainingSet {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut series = Vec::with_capacity(n_series);
    let mut labels = Vec::with_capacity(n_series);
    for i in 0..n_series {
        let rising = i % 2 == 0;
        let axes = (0..2)
            .map(|_| {
                (0..len)
                    .map(|t| {
                        let phase = (t % 12) as f64;
                        let base = if rising { phase } else { 11.0 - phase };
                        base + rng.gen_range(-0.3..0.3)
                    })
                    .collect()
            })
            .collect();
        series.push(TimeSeries::new(axes).unwrap());
        labels.push(match (i % 5, rising) {
            (4, _) => BTreeSet::new(),
            (_, true) => BTreeSet::from([Label::from("up")]),
            (_, false) => BTreeSet::from([Label::from("down")]),
        });
    }
    TrainingSet::new(series, labels).unwrap()
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("shapelet_fit");
    group.sample_size(10);
    let config = ShapeletConfig::new(24).unwrap().with_n_max(2).with_w_ext(3);
    for n in [10usize, 40] {
        let set = make_set(n, 120);
        group.bench_with_input(BenchmarkId::from_parameter(n), &set, |b, set| {
            b.iter(|| config.fit(set).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fit);
criterion_main!(benches);
