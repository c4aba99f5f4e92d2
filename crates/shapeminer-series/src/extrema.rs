//! Local extrema of a signal and of its first difference.
//!
//! [`find_extrema`] is the pure kernel; [`ExtremaIndexer`] memoizes it per
//! `(series, axis)` over a borrowed series collection.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::error::SeriesError;
use crate::series::{SeriesId, TimeSeries};

/// Extrema indices of one axis of one series.
///
/// Raw-signal indices refer to positions in the series; derivative indices
/// refer to positions in the first-difference array `d[i] = x[i+1] - x[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extrema {
    /// Local maxima of the raw signal.
    pub maxima: Vec<usize>,
    /// Local minima of the raw signal.
    pub minima: Vec<usize>,
    /// Local maxima of the first difference.
    pub derivative_maxima: Vec<usize>,
    /// Local minima of the first difference.
    pub derivative_minima: Vec<usize>,
}

impl Extrema {
    /// Sorted, deduplicated union of all four index sets.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        let mut all: Vec<usize> = self
            .maxima
            .iter()
            .chain(&self.minima)
            .chain(&self.derivative_maxima)
            .chain(&self.derivative_minima)
            .copied()
            .collect();
        all.sort_unstable();
        all.dedup();
        all
    }

    /// Return true if no extremum of any kind was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maxima.is_empty()
            && self.minima.is_empty()
            && self.derivative_maxima.is_empty()
            && self.derivative_minima.is_empty()
    }
}

/// Indices `i` where `cmp(x[i], x[j])` holds for every neighbor `j` within
/// `order` samples on both sides. Neighbor positions are clipped to the
/// array bounds, so end points and plateaus never qualify.
fn relative_extrema(values: &[f64], order: usize, cmp: fn(f64, f64) -> bool) -> Vec<usize> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let last = n - 1;
    (0..n)
        .filter(|&i| {
            (1..=order).all(|s| {
                let right = (i + s).min(last);
                let left = i.saturating_sub(s);
                cmp(values[i], values[right]) && cmp(values[i], values[left])
            })
        })
        .collect()
}

/// Find local extrema of `values` and of its first difference.
///
/// A point is a maximum (minimum) if it is strictly greater (smaller) than
/// every sample within `w_ext` positions on each side.
#[must_use]
pub fn find_extrema(values: &[f64], w_ext: usize) -> Extrema {
    let diff: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    Extrema {
        maxima: relative_extrema(values, w_ext, |a, b| a > b),
        minima: relative_extrema(values, w_ext, |a, b| a < b),
        derivative_maxima: relative_extrema(&diff, w_ext, |a, b| a > b),
        derivative_minima: relative_extrema(&diff, w_ext, |a, b| a < b),
    }
}

/// Memoized extrema lookup over a collection of series.
///
/// Each `(series, axis)` cell is a [`OnceLock`], so a key is computed exactly
/// once no matter how many threads request it concurrently. Keys are known
/// up front and stored densely; lookups never take a lock.
#[derive(Debug)]
pub struct ExtremaIndexer<'a> {
    series: &'a [TimeSeries],
    w_ext: usize,
    n_axes: usize,
    cells: Vec<OnceLock<Extrema>>,
    computed: AtomicUsize,
}

impl<'a> ExtremaIndexer<'a> {
    /// Create an empty indexer over `series`, which must share one axis count.
    #[must_use]
    pub fn new(series: &'a [TimeSeries], w_ext: usize) -> Self {
        let n_axes = series.first().map_or(0, TimeSeries::n_axes);
        let cells = (0..series.len() * n_axes).map(|_| OnceLock::new()).collect();
        Self {
            series,
            w_ext,
            n_axes,
            cells,
            computed: AtomicUsize::new(0),
        }
    }

    /// Return the minimum separation used for extremum detection.
    #[must_use]
    pub fn w_ext(&self) -> usize {
        self.w_ext
    }

    /// Return the extrema of one axis of one series, computing them on first access.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SeriesError::UnknownSeries`] | `id` is outside the collection |
    /// | [`SeriesError::AxisOutOfRange`] | `axis` is not an axis of the series |
    pub fn get(&self, id: SeriesId, axis: usize) -> Result<&Extrema, SeriesError> {
        let ts = self.series.get(id.index()).ok_or(SeriesError::UnknownSeries {
            series: id.index(),
            n_series: self.series.len(),
        })?;
        let values = ts.try_axis(axis)?;
        if axis >= self.n_axes {
            return Err(SeriesError::AxisOutOfRange { axis, n_axes: self.n_axes });
        }
        let cell = &self.cells[id.index() * self.n_axes + axis];
        Ok(cell.get_or_init(|| {
            self.computed.fetch_add(1, Ordering::Relaxed);
            let extrema = find_extrema(values, self.w_ext);
            debug!(series = %id, axis, n = extrema.indices().len(), "extrema indexed");
            extrema
        }))
    }

    /// Populate every `(series, axis)` key in parallel.
    ///
    /// # Errors
    ///
    /// Propagates the first lookup error, which only occurs when the series
    /// do not share one axis count.
    #[instrument(skip(self), fields(n_series = self.series.len(), n_axes = self.n_axes))]
    pub fn precompute(&self) -> Result<(), SeriesError> {
        (0..self.series.len())
            .into_par_iter()
            .flat_map_iter(|s| (0..self.n_axes).map(move |a| (s, a)))
            .try_for_each(|(s, a)| self.get(SeriesId::new(s), a).map(|_| ()))
    }

    /// Number of keys computed so far.
    #[must_use]
    pub fn computations(&self) -> usize {
        self.computed.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_peak() {
        let e = find_extrema(&[0.0, 1.0, 3.0, 1.0, 0.0], 1);
        assert_eq!(e.maxima, vec![2]);
        assert!(e.minima.is_empty());
    }

    #[test]
    fn endpoints_never_qualify() {
        let e = find_extrema(&[5.0, 1.0, 2.0, 1.0, 5.0], 1);
        assert_eq!(e.maxima, vec![2]);
        assert_eq!(e.minima, vec![1, 3]);
    }

    #[test]
    fn plateau_is_not_an_extremum() {
        let e = find_extrema(&[0.0, 2.0, 2.0, 0.0], 1);
        assert!(e.maxima.is_empty());
    }

    #[test]
    fn order_suppresses_close_peaks() {
        // Peaks at 1 and 3 are only two apart; with w_ext = 2 the lower one loses.
        let values = [0.0, 2.0, 0.0, 3.0, 0.0, 0.0, 0.0];
        assert_eq!(find_extrema(&values, 1).maxima, vec![1, 3]);
        assert_eq!(find_extrema(&values, 2).maxima, vec![3]);
    }

    #[test]
    fn derivative_extrema_of_sawtooth() {
        // diff = [1, 1, -3, 1, 1, -3, 1]: minima of the difference at 2 and 5.
        let values = [0.0, 1.0, 2.0, -1.0, 0.0, 1.0, -2.0, -1.0];
        let e = find_extrema(&values, 1);
        assert_eq!(e.derivative_minima, vec![2, 5]);
        assert!(e.derivative_maxima.is_empty());
    }

    #[test]
    fn constant_signal_has_no_extrema() {
        let e = find_extrema(&[1.0; 8], 2);
        assert!(e.is_empty());
        assert!(e.indices().is_empty());
    }

    #[test]
    fn empty_and_single_sample() {
        assert!(find_extrema(&[], 3).is_empty());
        assert!(find_extrema(&[1.0], 3).is_empty());
    }

    #[test]
    fn indices_union_sorted() {
        let e = Extrema {
            maxima: vec![7, 2],
            minima: vec![4],
            derivative_maxima: vec![2],
            derivative_minima: vec![0, 9],
        };
        assert_eq!(e.indices(), vec![0, 2, 4, 7, 9]);
    }

    fn two_series() -> Vec<TimeSeries> {
        vec![
            TimeSeries::new(vec![vec![0.0, 2.0, 0.0, 2.0, 0.0], vec![1.0; 5]]).unwrap(),
            TimeSeries::new(vec![vec![3.0, 1.0, 3.0, 1.0, 3.0], vec![0.0, 1.0, 0.0, 1.0, 0.0]])
                .unwrap(),
        ]
    }

    #[test]
    fn indexer_memoizes_each_key_once() {
        let series = two_series();
        let indexer = ExtremaIndexer::new(&series, 1);
        let first = indexer.get(SeriesId::new(0), 0).unwrap().clone();
        let again = indexer.get(SeriesId::new(0), 0).unwrap().clone();
        assert_eq!(first, again);
        assert_eq!(first.maxima, vec![1, 3]);
        assert_eq!(indexer.computations(), 1);

        indexer.precompute().unwrap();
        assert_eq!(indexer.computations(), 4);
        indexer.precompute().unwrap();
        assert_eq!(indexer.computations(), 4);
    }

    #[test]
    fn indexer_concurrent_access_computes_once() {
        let series = two_series();
        let indexer = ExtremaIndexer::new(&series, 1);
        (0..64).into_par_iter().for_each(|i| {
            let id = SeriesId::new(i % 2);
            let e = indexer.get(id, 1).unwrap();
            assert_eq!(e, &find_extrema(series[i % 2].axis(1).unwrap(), 1));
        });
        assert_eq!(indexer.computations(), 2);
    }

    #[test]
    fn indexer_rejects_unknown_keys() {
        let series = two_series();
        let indexer = ExtremaIndexer::new(&series, 1);
        assert!(matches!(
            indexer.get(SeriesId::new(5), 0),
            Err(SeriesError::UnknownSeries { series: 5, n_series: 2 })
        ));
        assert!(matches!(
            indexer.get(SeriesId::new(0), 2),
            Err(SeriesError::AxisOutOfRange { axis: 2, n_axes: 2 })
        ));
    }
}
