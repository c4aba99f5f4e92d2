//! Binary entropy and information gain, measured in bits.

use std::fmt;

/// Entropy in bits of a binary target with `positives` out of `total`.
///
/// Returns `0.0` for an empty or pure set.
#[must_use]
pub fn entropy(positives: usize, total: usize) -> f64 {
    if total == 0 || positives == 0 || positives == total {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    let q = 1.0 - p;
    -(p * p.log2() + q * q.log2())
}

/// Entropy reduction achieved by splitting a binary target in two.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct InformationGain(f64);

impl InformationGain {
    /// Gain of splitting `(positives, total)` into a low side and its complement.
    ///
    /// `H(all) - (n_low/n) * H(low) - (n_high/n) * H(high)`.
    #[must_use]
    pub fn of_split(positives: usize, total: usize, low_positives: usize, low_total: usize) -> Self {
        if total == 0 {
            return Self(0.0);
        }
        let high_positives = positives - low_positives;
        let high_total = total - low_total;
        let n = total as f64;
        let weighted = (low_total as f64 / n) * entropy(low_positives, low_total)
            + (high_total as f64 / n) * entropy(high_positives, high_total);
        Self(entropy(positives, total) - weighted)
    }

    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the gain in bits.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for InformationGain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}
