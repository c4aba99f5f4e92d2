//! End-to-end shapelet discovery on synthetic sawtooth data.

use std::collections::BTreeSet;

use proptest::prelude::*;
use shapeminer_search::{SearchError, ShapeletConfig, TrainingSet, window_lengths};
use shapeminer_series::{DimensionSubset, Label, TimeSeries};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Rising sawtooth of period 10 on both axes, scaled and shifted per axis.
fn rising(len: usize, scale: f64, shift: f64) -> TimeSeries {
    let axis = |s: f64, b: f64| (0..len).map(|t| s * (t % 10) as f64 + b).collect::<Vec<_>>();
    TimeSeries::new(vec![axis(scale, shift), axis(scale * 0.5, -shift)]).expect("valid series")
}

/// Falling sawtooth of period 10 on both axes.
fn falling(len: usize, scale: f64, shift: f64) -> TimeSeries {
    let axis =
        |s: f64, b: f64| (0..len).map(|t| s * (9 - t % 10) as f64 + b).collect::<Vec<_>>();
    TimeSeries::new(vec![axis(scale, shift), axis(scale * 2.0, shift)]).expect("valid series")
}

fn labels(names: &[&str]) -> BTreeSet<Label> {
    names.iter().map(|&n| Label::from(n)).collect()
}

fn sawtooth_set(extra: Vec<(TimeSeries, BTreeSet<Label>)>) -> TrainingSet {
    let mut series = vec![
        rising(40, 1.0, 0.0),
        rising(40, 2.5, 3.0),
        rising(40, 0.7, -1.0),
        falling(40, 1.0, 0.0),
        falling(40, 3.0, 10.0),
        falling(40, 0.4, -2.0),
    ];
    let mut label_sets = vec![
        labels(&["A"]),
        labels(&["A"]),
        labels(&["A"]),
        labels(&["B"]),
        labels(&["B"]),
        labels(&["B"]),
    ];
    for (ts, l) in extra {
        series.push(ts);
        label_sets.push(l);
    }
    TrainingSet::new(series, label_sets).expect("valid training set")
}

fn sawtooth_config() -> ShapeletConfig {
    ShapeletConfig::new(10)
        .expect("valid sl_max")
        .with_n_max(1)
        .with_w_ext(1)
        .with_d_max(0.5)
}

// ---------------------------------------------------------------------------
// a) sawtooth_classes_are_separated
// ---------------------------------------------------------------------------

#[test]
fn sawtooth_classes_are_separated() {
    let set = sawtooth_set(Vec::new());
    let outcome = sawtooth_config().fit_with_summary(&set).unwrap();
    let model = &outcome.model;

    assert_eq!(outcome.summary.sigma_min, 0.0);
    assert!(outcome.summary.sigma_min_estimated);
    assert_eq!(outcome.summary.windows, vec![10]);
    assert_eq!(outcome.summary.n_dimension_subsets, 3);
    assert!(outcome.summary.skipped_labels.is_empty());

    let labels: Vec<&str> = model.labels().map(Label::as_str).collect();
    assert_eq!(labels, vec!["A", "B"]);

    for (label, m) in model.iter() {
        let c = &m.classifier;
        assert!((c.gain().value() - 1.0).abs() < 1e-9, "{label}: gain {}", c.gain());
        assert_eq!(c.window(), 10);
        assert!(c.delta() > 0.5 && c.delta() < 3.0, "{label}: delta {}", c.delta());
        assert_eq!(m.target.iter().filter(|&&t| t).count(), 3);
    }

    // Held-out series: different length, scale and offset.
    let a = &model.get(&Label::from("A")).unwrap().classifier;
    let b = &model.get(&Label::from("B")).unwrap().classifier;
    let new_rising = rising(33, 4.0, -7.0);
    let new_falling = falling(27, 0.9, 5.0);

    assert!(a.matches(&new_rising).unwrap());
    assert!(!a.matches(&new_falling).unwrap());
    assert!(b.matches(&new_falling).unwrap());
    assert!(!b.matches(&new_rising).unwrap());

    assert!(a.any_below_threshold(&new_rising).unwrap());
    assert!(!a.any_below_threshold(&new_falling).unwrap());
    assert!(a.predict(&new_rising).unwrap().min < 1e-9);
}

#[test]
fn two_series_per_class() {
    let set = TrainingSet::new(
        vec![
            rising(40, 1.0, 0.0),
            rising(40, 2.0, 1.0),
            falling(40, 1.0, 0.0),
            falling(40, 0.5, 4.0),
        ],
        vec![labels(&["A"]), labels(&["A"]), labels(&["B"]), labels(&["B"])],
    )
    .unwrap();
    let model = sawtooth_config().fit(&set).unwrap();
    assert_eq!(model.labels().map(Label::as_str).collect::<Vec<_>>(), vec!["A", "B"]);

    let a = &model.get(&Label::from("A")).unwrap().classifier;
    let b = &model.get(&Label::from("B")).unwrap().classifier;
    let held_a = rising(30, 1.5, 2.0);
    let held_b = falling(30, 1.5, 2.0);
    assert!(a.predict(&held_a).unwrap().min < a.delta());
    assert!(a.predict(&held_b).unwrap().min >= a.delta());
    assert!(b.predict(&held_b).unwrap().min < b.delta());
    assert!(b.predict(&held_a).unwrap().min >= b.delta());
}

#[test]
fn underflowing_spread_stays_finite() {
    // Alternates between 0 and 1e-200: not flat, but its variance underflows.
    let tiny_axis: Vec<f64> = (0..40).map(|t| if t % 2 == 0 { 0.0 } else { 1e-200 }).collect();
    let tiny = TimeSeries::new(vec![tiny_axis.clone(), tiny_axis]).unwrap();
    let set = TrainingSet::new(
        vec![rising(40, 1.0, 0.0), rising(40, 2.5, 3.0), tiny],
        vec![labels(&["A"]), labels(&["A"]), labels(&["B"])],
    )
    .unwrap();

    let model = sawtooth_config().fit(&set).unwrap();
    let a = &model.get(&Label::from("A")).unwrap().classifier;
    assert!((a.gain().value() - 1.0).abs() < 1e-9, "gain {}", a.gain());
    for (label, m) in model.iter() {
        let c = &m.classifier;
        assert!(c.delta().is_finite(), "{label}: delta {}", c.delta());
        assert!(c.flattened().iter().all(|v| v.is_finite()), "{label}: non-finite shapelet");
    }
}

#[test]
fn full_tie_keeps_last_dimension_subset() {
    // Both axes carry the same values, so pools {0} and {1} are identical.
    let twin = |ts: TimeSeries| {
        let axis = ts.axes().next().unwrap().to_vec();
        TimeSeries::new(vec![axis.clone(), axis]).unwrap()
    };
    let set = TrainingSet::new(
        vec![
            twin(rising(40, 1.0, 0.0)),
            twin(rising(40, 2.0, 1.0)),
            twin(falling(40, 1.0, 0.0)),
            twin(falling(40, 0.5, 4.0)),
        ],
        vec![labels(&["A"]), labels(&["A"]), labels(&["B"]), labels(&["B"])],
    )
    .unwrap();

    let model = sawtooth_config().fit(&set).unwrap();
    let last_single = DimensionSubset::new(vec![1]).unwrap();
    for (label, m) in model.iter() {
        let c = &m.classifier;
        assert!((c.gain().value() - 1.0).abs() < 1e-9, "{label}: gain {}", c.gain());
        assert_eq!(c.dims(), &last_single, "{label}");
    }
}

// ---------------------------------------------------------------------------
// b) repeated_runs_are_identical
// ---------------------------------------------------------------------------

#[test]
fn repeated_runs_are_identical() {
    let flat = TimeSeries::new(vec![vec![0.0; 40], vec![1.0; 40]]).unwrap();
    let set = sawtooth_set(vec![(flat, BTreeSet::new())]);
    let config = sawtooth_config().with_n_max(2);

    let first = config.fit_with_summary(&set).unwrap();
    let second = config.fit_with_summary(&set).unwrap();
    assert_eq!(first.model, second.model);
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.summary.windows, vec![5, 10]);
    // The flat background series has zero spread everywhere.
    assert_eq!(first.summary.sigma_min, 0.0);
}

// ---------------------------------------------------------------------------
// c) label_without_candidates_is_absent
// ---------------------------------------------------------------------------

#[test]
fn label_without_candidates_is_absent() {
    let flat = TimeSeries::new(vec![vec![2.0; 40], vec![-1.0; 40]]).unwrap();
    let set = sawtooth_set(vec![(flat, labels(&["C"]))]);
    let outcome = sawtooth_config().fit_with_summary(&set).unwrap();

    assert!(outcome.model.get(&Label::from("C")).is_none());
    assert_eq!(outcome.summary.skipped_labels, vec![Label::from("C")]);
    assert_eq!(outcome.model.len(), 2);
}

// ---------------------------------------------------------------------------
// d) explicit_sigma_min_is_used
// ---------------------------------------------------------------------------

#[test]
fn explicit_sigma_min_is_used() {
    let set = sawtooth_set(Vec::new());
    let outcome = sawtooth_config()
        .with_sigma_min(Some(0.01))
        .fit_with_summary(&set)
        .unwrap();
    assert_eq!(outcome.summary.sigma_min, 0.01);
    assert!(!outcome.summary.sigma_min_estimated);
    for (_, m) in outcome.model.iter() {
        assert_eq!(m.classifier.sigma_min(), 0.01);
    }
}

// ---------------------------------------------------------------------------
// e) invalid_configuration_fails_before_search
// ---------------------------------------------------------------------------

#[test]
fn invalid_configuration_fails_before_search() {
    let set = sawtooth_set(Vec::new());
    let too_long = ShapeletConfig::new(41).unwrap();
    assert!(matches!(
        too_long.fit(&set),
        Err(SearchError::SlMaxExceedsSeries { sl_max: 41, min_len: 40 })
    ));
    assert!(matches!(
        sawtooth_config().with_d_max(0.0).fit(&set),
        Err(SearchError::InvalidDMax { .. })
    ));
}

// ---------------------------------------------------------------------------
// f) window_lengths properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn window_lengths_are_strictly_increasing(sl_max in 1usize..500, n_frac in 0.0f64..1.0) {
        let n_max = 1 + ((sl_max - 1) as f64 * n_frac) as usize;
        let windows = window_lengths(sl_max, n_max);
        prop_assert_eq!(windows.len(), n_max);
        prop_assert!(windows.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(windows.iter().all(|&w| w > 0 && w <= sl_max));
        prop_assert_eq!(windows.last().copied(), Some(sl_max));
    }
}
