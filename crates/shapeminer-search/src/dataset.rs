//! Labeled training collections.

use std::collections::BTreeSet;

use shapeminer_series::{Label, SeriesId, TimeSeries};

use crate::error::SearchError;

/// Training series paired with their label sets.
///
/// An empty label set marks an unlabeled (background) series. Guaranteed
/// non-empty, with one label set per series and a uniform axis count.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    series: Vec<TimeSeries>,
    labels: Vec<BTreeSet<Label>>,
}

impl TrainingSet {
    /// Pair `series` with `labels` by position.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SearchError::EmptyTrainingSet`] | `series` is empty |
    /// | [`SearchError::LabelCountMismatch`] | lengths differ |
    /// | [`SearchError::AxisCountMismatch`] | a series has a different axis count than the first |
    pub fn new(series: Vec<TimeSeries>, labels: Vec<BTreeSet<Label>>) -> Result<Self, SearchError> {
        let first = series.first().ok_or(SearchError::EmptyTrainingSet)?;
        if series.len() != labels.len() {
            return Err(SearchError::LabelCountMismatch {
                n_series: series.len(),
                n_labels: labels.len(),
            });
        }
        let expected = first.n_axes();
        if let Some((i, ts)) = series.iter().enumerate().find(|(_, ts)| ts.n_axes() != expected) {
            return Err(SearchError::AxisCountMismatch {
                series: i,
                expected,
                got: ts.n_axes(),
            });
        }
        Ok(Self { series, labels })
    }

    /// Return the number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Always `false`; a training set holds at least one series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Return the shared axis count.
    #[must_use]
    pub fn n_axes(&self) -> usize {
        self.series[0].n_axes()
    }

    /// Return the length of the shortest series.
    #[must_use]
    pub fn min_len(&self) -> usize {
        self.series.iter().map(TimeSeries::len).min().unwrap_or(0)
    }

    /// Borrow every series in collection order.
    #[must_use]
    pub fn series(&self) -> &[TimeSeries] {
        &self.series
    }

    /// Borrow one series.
    #[must_use]
    pub fn get(&self, id: SeriesId) -> Option<&TimeSeries> {
        self.series.get(id.index())
    }

    /// Borrow the label set of one series.
    #[must_use]
    pub fn labels_of(&self, id: SeriesId) -> Option<&BTreeSet<Label>> {
        self.labels.get(id.index())
    }

    /// Every distinct label, in label order.
    #[must_use]
    pub fn unique_labels(&self) -> BTreeSet<Label> {
        self.labels.iter().flatten().cloned().collect()
    }

    /// One-vs-rest target for `label`: true where the series carries it.
    #[must_use]
    pub fn target(&self, label: &Label) -> Vec<bool> {
        self.labels.iter().map(|set| set.contains(label)).collect()
    }

    /// Iterate over `(id, series, labels)` in collection order.
    pub fn iter(&self) -> impl Iterator<Item = (SeriesId, &TimeSeries, &BTreeSet<Label>)> + '_ {
        self.series
            .iter()
            .zip(&self.labels)
            .enumerate()
            .map(|(i, (ts, labels))| (SeriesId::new(i), ts, labels))
    }

    /// Iterate over the series without any label.
    pub fn unlabeled(&self) -> impl Iterator<Item = &TimeSeries> + '_ {
        self.iter().filter(|(_, _, l)| l.is_empty()).map(|(_, ts, _)| ts)
    }
}
