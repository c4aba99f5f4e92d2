//! Euclidean distance kernels over flattened subsequences.

/// Squared Euclidean distance between two equal-length slices.
///
/// # Panics
///
/// Debug builds assert equal lengths.
#[must_use]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Euclidean distance between two equal-length slices.
#[must_use]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Squared Euclidean distance with early abandoning.
///
/// Stops accumulating as soon as the partial sum exceeds `cutoff` and returns
/// that partial sum; the result is exact whenever it is `<= cutoff`.
#[must_use]
pub(crate) fn squared_euclidean_cutoff(a: &[f64], b: &[f64], cutoff: f64) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut acc = 0.0;
    for (x, y) in a.iter().zip(b) {
        acc += (x - y).powi(2);
        if acc > cutoff {
            return acc;
        }
    }
    acc
}
