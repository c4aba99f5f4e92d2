//! Distance profiles and batched best-matching distances.

use crate::dims::DimensionSubset;
use crate::distance::{euclidean, squared_euclidean_cutoff};
use crate::error::SeriesError;
use crate::subsequence::NormalizedWindows;

/// Gather every subsequence of `windows` over `dims` into one flat,
/// row-per-offset matrix.
fn gather(windows: &NormalizedWindows, dims: &DimensionSubset) -> Vec<f64> {
    let mut rows = Vec::with_capacity(windows.n_windows() * windows.window() * dims.len());
    for offset in 0..windows.n_windows() {
        for &axis in dims.axes() {
            rows.extend_from_slice(windows.segment(offset, axis));
        }
    }
    rows
}

fn check_shapelet(
    shapelet: &[f64],
    windows: &NormalizedWindows,
    dims: &DimensionSubset,
) -> Result<(), SeriesError> {
    let expected = windows.window() * dims.len();
    if shapelet.len() != expected {
        return Err(SeriesError::ShapeletLengthMismatch {
            expected,
            got: shapelet.len(),
        });
    }
    Ok(())
}

/// Distance from `shapelet` to the subsequence at every offset of `windows`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`SeriesError::AxisOutOfRange`] | `dims` references a missing axis |
/// | [`SeriesError::ShapeletLengthMismatch`] | `shapelet.len() != window * dims.len()` |
pub fn distance_profile(
    shapelet: &[f64],
    windows: &NormalizedWindows,
    dims: &DimensionSubset,
) -> Result<Vec<f64>, SeriesError> {
    dims.check_axes(windows.n_axes())?;
    check_shapelet(shapelet, windows, dims)?;
    let rows = gather(windows, dims);
    Ok(rows
        .chunks_exact(shapelet.len())
        .map(|row| euclidean(shapelet, row))
        .collect())
}

/// Best-matching distance (minimum over offsets) of each shapelet against
/// one series, computed as a single batch.
///
/// The series' subsequences are gathered once and shared by all shapelets;
/// per shapelet, squared distances are early-abandoned against the running
/// minimum and only the winner is square-rooted.
///
/// # Errors
///
/// Same as [`distance_profile`], checked for every shapelet.
pub fn best_match_distances<S: AsRef<[f64]>>(
    shapelets: &[S],
    windows: &NormalizedWindows,
    dims: &DimensionSubset,
) -> Result<Vec<f64>, SeriesError> {
    dims.check_axes(windows.n_axes())?;
    for s in shapelets {
        check_shapelet(s.as_ref(), windows, dims)?;
    }
    let width = windows.window() * dims.len();
    let rows = gather(windows, dims);
    Ok(shapelets
        .iter()
        .map(|s| {
            let s = s.as_ref();
            rows.chunks_exact(width)
                .fold(f64::INFINITY, |best, row| {
                    best.min(squared_euclidean_cutoff(s, row, best))
                })
                .sqrt()
        })
        .collect())
}
