//! Subsequence extraction and z-normalization with a noise floor.

use crate::dims::DimensionSubset;
use crate::error::SeriesError;
use crate::series::TimeSeries;

/// Population mean and standard deviation (divides by n, not n-1).
///
/// Returns `(0.0, 0.0)` for an empty slice.
#[must_use]
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Z-normalize `values` into `out`, leaving them raw when the segment is flat,
/// its standard deviation underflows, or it is below `sigma_min`.
fn z_normalize_into(values: &[f64], sigma_min: f64, out: &mut Vec<f64>) {
    let flat = values.iter().all(|&v| v == values[0]);
    let (mean, std) = mean_std(values);
    if flat || !std.is_normal() || std < sigma_min {
        out.extend_from_slice(values);
    } else {
        out.extend(values.iter().map(|&x| (x - mean) / std));
    }
}

/// Z-normalize one axis of a subsequence.
///
/// Values are returned unchanged when the segment is exactly flat, its
/// population standard deviation is zero or subnormal, or it is below
/// `sigma_min`. The output is finite whenever the input is.
#[must_use = "returns a new normalized vector; the input is unchanged"]
pub fn z_normalize(values: &[f64], sigma_min: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if !values.is_empty() {
        z_normalize_into(values, sigma_min, &mut out);
    }
    out
}

fn check_window(series: &TimeSeries, window: usize) -> Result<(), SeriesError> {
    if window == 0 {
        return Err(SeriesError::ZeroWindow);
    }
    if window > series.len() {
        return Err(SeriesError::WindowTooLong {
            window,
            len: series.len(),
        });
    }
    Ok(())
}

/// Largest per-axis population standard deviation over every raw
/// subsequence of length `window`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`SeriesError::ZeroWindow`] | `window == 0` |
/// | [`SeriesError::WindowTooLong`] | `window > series.len()` |
pub fn max_subsequence_std(series: &TimeSeries, window: usize) -> Result<f64, SeriesError> {
    check_window(series, window)?;
    Ok(series
        .axes()
        .flat_map(|values| values.windows(window).map(|w| mean_std(w).1))
        .fold(0.0, f64::max))
}

/// Every stride-1 subsequence of one series at one window length,
/// z-normalized per axis.
///
/// Layout is `[offset][axis][t]`, so the `window` values of one axis at one
/// offset are contiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWindows {
    window: usize,
    n_axes: usize,
    n_windows: usize,
    data: Vec<f64>,
}

impl NormalizedWindows {
    /// Extract and normalize all subsequences of `series` of length `window`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SeriesError::ZeroWindow`] | `window == 0` |
    /// | [`SeriesError::WindowTooLong`] | `window > series.len()` |
    pub fn new(series: &TimeSeries, window: usize, sigma_min: f64) -> Result<Self, SeriesError> {
        check_window(series, window)?;
        let n_axes = series.n_axes();
        let n_windows = series.len() - window + 1;
        let mut data = Vec::with_capacity(n_windows * n_axes * window);
        for offset in 0..n_windows {
            for values in series.axes() {
                z_normalize_into(&values[offset..offset + window], sigma_min, &mut data);
            }
        }
        Ok(Self {
            window,
            n_axes,
            n_windows,
            data,
        })
    }

    /// Return the subsequence length.
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Return the number of axes of the source series.
    #[must_use]
    pub fn n_axes(&self) -> usize {
        self.n_axes
    }

    /// Return the number of subsequences (`len - window + 1`).
    #[must_use]
    pub fn n_windows(&self) -> usize {
        self.n_windows
    }

    /// Borrow the normalized values of one axis of the subsequence at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= n_windows()` or `axis >= n_axes()`.
    #[must_use]
    pub fn segment(&self, offset: usize, axis: usize) -> &[f64] {
        assert!(offset < self.n_windows, "offset {offset} out of range");
        assert!(axis < self.n_axes, "axis {axis} out of range");
        let start = (offset * self.n_axes + axis) * self.window;
        &self.data[start..start + self.window]
    }

    /// Flatten the subsequence at `offset` over `dims`, axis after axis.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= n_windows()` or `dims` references a missing axis;
    /// callers validate `dims` with [`DimensionSubset::check_axes`].
    #[must_use]
    pub fn candidate(&self, offset: usize, dims: &DimensionSubset) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.window * dims.len());
        for &axis in dims.axes() {
            out.extend_from_slice(self.segment(offset, axis));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(axes: Vec<Vec<f64>>) -> TimeSeries {
        TimeSeries::new(axes).unwrap()
    }

    #[test]
    fn z_normalize_zero_mean_unit_std() {
        let out = z_normalize(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.0);
        let (mean, std) = mean_std(&out);
        assert!(mean.abs() < 1e-10, "mean was {mean}");
        assert!((std - 1.0).abs() < 1e-10, "std was {std}");
    }

    #[test]
    fn z_normalize_flat_is_unchanged() {
        let values = [0.1, 0.1, 0.1, 0.1];
        assert_eq!(z_normalize(&values, 0.0), values.to_vec());
    }

    #[test]
    fn z_normalize_below_floor_is_unchanged() {
        let values = [1.0, 1.1, 0.9, 1.0];
        assert_eq!(z_normalize(&values, 0.5), values.to_vec());
        assert_ne!(z_normalize(&values, 0.01), values.to_vec());
    }

    #[test]
    fn z_normalize_underflowing_std_is_unchanged() {
        // Not flat, but the variance underflows to zero.
        let values = [0.0, 1e-200, 0.0, 1e-200];
        assert_eq!(mean_std(&values).1, 0.0);
        let out = z_normalize(&values, 0.0);
        assert!(out.iter().all(|v| v.is_finite()));
        assert_eq!(out, values.to_vec());

        let ts = series(vec![values.to_vec()]);
        let w = NormalizedWindows::new(&ts, 3, 0.0).unwrap();
        assert_eq!(w.segment(0, 0), &values[..3]);
    }

    #[test]
    fn z_normalize_empty() {
        assert!(z_normalize(&[], 0.0).is_empty());
    }

    #[test]
    fn windows_count_and_layout() {
        let ts = series(vec![vec![0.0, 1.0, 2.0, 3.0], vec![5.0; 4]]);
        let w = NormalizedWindows::new(&ts, 3, 0.0).unwrap();
        assert_eq!(w.n_windows(), 2);
        assert_eq!(w.n_axes(), 2);
        // Axis 1 is flat and stays raw.
        assert_eq!(w.segment(1, 1), &[5.0, 5.0, 5.0]);
        // Axis 0 is a ramp: normalized to [-sqrt(1.5), 0, sqrt(1.5)].
        let ramp = w.segment(0, 0);
        assert!((ramp[1]).abs() < 1e-12);
        assert!((ramp[2] - 1.5_f64.sqrt()).abs() < 1e-12);
        assert_eq!(w.segment(0, 0), w.segment(1, 0));
    }

    #[test]
    fn candidate_concatenates_axes() {
        let ts = series(vec![vec![1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0], vec![3.0, 3.0, 3.0]]);
        let w = NormalizedWindows::new(&ts, 2, 0.0).unwrap();
        let dims = DimensionSubset::new(vec![2, 0]).unwrap();
        assert_eq!(w.candidate(1, &dims), vec![1.0, 1.0, 3.0, 3.0]);
    }

    #[test]
    fn window_validation() {
        let ts = series(vec![vec![1.0, 2.0]]);
        assert!(matches!(
            NormalizedWindows::new(&ts, 0, 0.0),
            Err(SeriesError::ZeroWindow)
        ));
        assert!(matches!(
            NormalizedWindows::new(&ts, 3, 0.0),
            Err(SeriesError::WindowTooLong { window: 3, len: 2 })
        ));
    }

    #[test]
    fn max_std_over_all_axes() {
        // Axis 1 window [0, 4] has std 2, the largest of any window.
        let ts = series(vec![vec![0.0, 1.0, 0.0], vec![0.0, 4.0, 4.0]]);
        let s = max_subsequence_std(&ts, 2).unwrap();
        assert!((s - 2.0).abs() < 1e-12);
    }
}
