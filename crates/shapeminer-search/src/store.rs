//! Precomputed normalized subsequences and noise-floor estimation.

use rayon::prelude::*;
use shapeminer_series::{NormalizedWindows, SeriesId, max_subsequence_std};
use tracing::{info, instrument};

use crate::dataset::TrainingSet;
use crate::error::SearchError;

/// Largest raw subsequence standard deviation among unlabeled series at the
/// smallest window; `0.0` when every series is labeled.
///
/// # Errors
///
/// Propagates [`SearchError::Series`] if `smallest_window` is zero or longer
/// than an unlabeled series.
#[instrument(skip(set), fields(n_series = set.len()))]
pub fn estimate_sigma_min(set: &TrainingSet, smallest_window: usize) -> Result<f64, SearchError> {
    let background: Vec<_> = set.unlabeled().collect();
    if background.is_empty() {
        info!("no unlabeled series, sigma_min set to 0");
        return Ok(0.0);
    }
    let sigma = background
        .par_iter()
        .map(|ts| max_subsequence_std(ts, smallest_window))
        .try_reduce(|| 0.0, |a, b| Ok(a.max(b)))?;
    info!(sigma_min = sigma, n_unlabeled = background.len(), "sigma_min estimated");
    Ok(sigma)
}

/// Normalized subsequences of every training series at every window length.
///
/// Built once in parallel; read-only afterwards.
#[derive(Debug)]
pub struct NormalizedStore {
    windows: Vec<usize>,
    sigma_min: f64,
    cells: Vec<NormalizedWindows>,
}

impl NormalizedStore {
    /// Normalize every `(series, window)` pair with noise floor `sigma_min`.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchError::Series`] if a window is zero or longer than a series.
    #[instrument(skip(set, windows), fields(n_series = set.len(), n_windows = windows.len()))]
    pub fn build(set: &TrainingSet, windows: &[usize], sigma_min: f64) -> Result<Self, SearchError> {
        let cells = set
            .series()
            .par_iter()
            .flat_map_iter(|ts| windows.iter().map(move |&w| NormalizedWindows::new(ts, w, sigma_min)))
            .collect::<Result<Vec<_>, _>>()?;
        info!(n_cells = cells.len(), sigma_min, "normalized subsequences precomputed");
        Ok(Self {
            windows: windows.to_vec(),
            sigma_min,
            cells,
        })
    }

    /// Return the noise floor the store was built with.
    #[must_use]
    pub fn sigma_min(&self) -> f64 {
        self.sigma_min
    }

    /// Return the window lengths held by the store.
    #[must_use]
    pub fn windows(&self) -> &[usize] {
        &self.windows
    }

    /// Borrow the normalized subsequences of one series at one window.
    #[must_use]
    pub fn get(&self, series: SeriesId, window: usize) -> Option<&NormalizedWindows> {
        let w = self.windows.iter().position(|&x| x == window)?;
        self.cells.get(series.index() * self.windows.len() + w)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use shapeminer_series::{Label, TimeSeries};

    use super::*;

    fn set(labels: Vec<BTreeSet<Label>>) -> TrainingSet {
        let series = vec![
            TimeSeries::new(vec![vec![0.0, 2.0, 0.0, 2.0, 0.0]]).unwrap(),
            TimeSeries::new(vec![vec![0.0, 0.0, 6.0, 0.0, 0.0]]).unwrap(),
        ];
        TrainingSet::new(series, labels).unwrap()
    }

    #[test]
    fn sigma_from_unlabeled_only() {
        let labeled: BTreeSet<Label> = [Label::from("x")].into();
        // Only series 0 is unlabeled: every width-2 window has std 1.
        let s = estimate_sigma_min(&set(vec![BTreeSet::new(), labeled]), 2).unwrap();
        assert!((s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sigma_zero_without_background() {
        let labeled: BTreeSet<Label> = [Label::from("x")].into();
        let s = estimate_sigma_min(&set(vec![labeled.clone(), labeled]), 2).unwrap();
        assert_eq!(s, 0.0);
    }

    #[test]
    fn store_lookup() {
        let set = set(vec![BTreeSet::new(), BTreeSet::new()]);
        let store = NormalizedStore::build(&set, &[2, 4], 0.0).unwrap();
        assert_eq!(store.get(SeriesId::new(1), 4).map(NormalizedWindows::n_windows), Some(2));
        assert_eq!(store.get(SeriesId::new(0), 2).map(NormalizedWindows::window), Some(2));
        assert!(store.get(SeriesId::new(0), 3).is_none());
        assert!(store.get(SeriesId::new(2), 2).is_none());
    }
}
