//! Threshold fitting: the distance split with the highest information gain.

use std::cmp::Ordering;

use crate::error::ClassifyError;
use crate::gain::InformationGain;

/// A fitted decision threshold over best-matching distances.
///
/// Series whose distance is strictly below `delta` are predicted positive.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ThresholdFit {
    delta: f64,
    gain: InformationGain,
    f_c_delta: f64,
}

impl ThresholdFit {
    /// Return the decision threshold.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Return the information gain of the split.
    #[must_use]
    pub fn gain(&self) -> InformationGain {
        self.gain
    }

    /// Return the class margin: the smallest distance gap between a low-side
    /// and a high-side series of different classes, or `+inf` if none exists.
    #[must_use]
    pub fn f_c_delta(&self) -> f64 {
        self.f_c_delta
    }

    /// Order two fits: higher gain is greater; on equal gain the smaller
    /// margin is greater.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.gain
            .value()
            .total_cmp(&other.gain.value())
            .then_with(|| other.f_c_delta.total_cmp(&self.f_c_delta))
    }

    #[cfg(test)]
    pub(crate) fn from_parts(delta: f64, gain: f64, f_c_delta: f64) -> Self {
        Self {
            delta,
            gain: InformationGain::new(gain),
            f_c_delta,
        }
    }
}

/// Running per-class extremes on each side of a split.
#[derive(Clone, Copy)]
struct ClassBounds {
    positive: Option<f64>,
    negative: Option<f64>,
}

impl ClassBounds {
    const NONE: Self = Self {
        positive: None,
        negative: None,
    };

    fn get(self, positive: bool) -> Option<f64> {
        if positive { self.positive } else { self.negative }
    }
}

/// Smallest `b - a` with `a` on the low side and `b` on the high side of
/// opposite classes.
fn class_margin(low_max: ClassBounds, high_min: ClassBounds) -> f64 {
    [true, false]
        .into_iter()
        .filter_map(|pos| Some(high_min.get(!pos)? - low_max.get(pos)?))
        .fold(f64::INFINITY, f64::min)
}

/// A threshold strictly between `a < b`, so that `a < delta <= b`.
fn midpoint(a: f64, b: f64) -> f64 {
    let mid = a + (b - a) / 2.0;
    if mid > a { mid } else { b }
}

/// Fit the threshold that best separates `target` by `distances`.
///
/// Candidate splits are the boundary below the smallest distance, every gap
/// between consecutive distinct distances (threshold at the midpoint) and the
/// boundary above the largest distance. The winner has the highest gain;
/// among equal gains the smallest class margin wins, then the first found.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ClassifyError::EmptyTarget`] | `target` is empty |
/// | [`ClassifyError::TargetLengthMismatch`] | lengths differ |
/// | [`ClassifyError::NonFiniteDistance`] | a distance is NaN or infinite |
pub fn fit_threshold(distances: &[f64], target: &[bool]) -> Result<ThresholdFit, ClassifyError> {
    if target.is_empty() {
        return Err(ClassifyError::EmptyTarget);
    }
    if distances.len() != target.len() {
        return Err(ClassifyError::TargetLengthMismatch {
            expected: target.len(),
            got: distances.len(),
        });
    }
    if let Some(index) = distances.iter().position(|d| !d.is_finite()) {
        return Err(ClassifyError::NonFiniteDistance { index });
    }

    let mut sorted: Vec<(f64, bool)> = distances.iter().copied().zip(target.iter().copied()).collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
    let n = sorted.len();
    let positives = target.iter().filter(|&&t| t).count();

    // high_min[k]: per-class minimum over sorted[k..].
    let mut high_min = vec![ClassBounds::NONE; n + 1];
    for k in (0..n).rev() {
        let (value, pos) = sorted[k];
        let mut bounds = high_min[k + 1];
        if pos {
            bounds.positive = Some(value);
        } else {
            bounds.negative = Some(value);
        }
        high_min[k] = bounds;
    }

    let score = |k: usize, low_positives: usize, low_max: ClassBounds, delta: f64| ThresholdFit {
        delta,
        gain: InformationGain::of_split(positives, n, low_positives, k),
        f_c_delta: class_margin(low_max, high_min[k]),
    };

    let mut best = score(0, 0, ClassBounds::NONE, sorted[0].0);
    let mut low_max = ClassBounds::NONE;
    let mut low_positives = 0;
    for k in 1..=n {
        let (value, pos) = sorted[k - 1];
        if pos {
            low_positives += 1;
            low_max.positive = Some(value);
        } else {
            low_max.negative = Some(value);
        }
        let delta = match sorted.get(k) {
            Some(&(next, _)) if next == value => continue,
            Some(&(next, _)) => midpoint(value, next),
            None => value.next_up(),
        };
        let candidate = score(k, low_positives, low_max, delta);
        if candidate.compare(&best) == Ordering::Greater {
            best = candidate;
        }
    }
    Ok(best)
}
