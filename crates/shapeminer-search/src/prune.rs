//! Extrema-anchored candidate pruning.

use std::collections::BTreeMap;

use shapeminer_series::{DimensionSubset, ExtremaIndexer, Label, SeriesId};
use tracing::debug;

use crate::dataset::TrainingSet;
use crate::error::SearchError;
use crate::store::NormalizedStore;

/// A flattened normalized subsequence with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Series the subsequence was taken from.
    pub series: SeriesId,
    /// Start offset inside that series.
    pub offset: usize,
    /// Normalized values, axis after axis.
    pub values: Vec<f64>,
}

/// Keeps only subsequences anchored near local extrema.
#[derive(Debug, Clone, Copy)]
pub struct CandidatePruner<'a> {
    set: &'a TrainingSet,
    extrema: &'a ExtremaIndexer<'a>,
    store: &'a NormalizedStore,
}

impl<'a> CandidatePruner<'a> {
    /// Create a pruner over precomputed extrema and normalized subsequences.
    #[must_use]
    pub fn new(
        set: &'a TrainingSet,
        extrema: &'a ExtremaIndexer<'a>,
        store: &'a NormalizedStore,
    ) -> Self {
        Self { set, extrema, store }
    }

    /// Start offsets of the candidates kept for one series.
    ///
    /// Every extremum on any axis of `dims` is shifted left by `window / 2`,
    /// clamped to a valid start, and deduplicated.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchError::Series`] for an unknown series or axis.
    pub fn offsets(
        &self,
        id: SeriesId,
        window: usize,
        dims: &DimensionSubset,
        len: usize,
    ) -> Result<Vec<usize>, SearchError> {
        let last_start = len.saturating_sub(window);
        let mut offsets = Vec::new();
        for &axis in dims.axes() {
            let extrema = self.extrema.get(id, axis)?;
            offsets.extend(
                extrema
                    .indices()
                    .into_iter()
                    .map(|i| i.saturating_sub(window / 2).min(last_start)),
            );
        }
        offsets.sort_unstable();
        offsets.dedup();
        Ok(offsets)
    }

    /// Candidate pools per label for one `(window, dims)` combination.
    ///
    /// Candidates of a multi-label series are added to the pool of each of
    /// its labels. Pools are ordered by series, then offset; unlabeled series
    /// contribute nothing.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SearchError::Series`] | `dims` references a missing axis |
    /// | [`SearchError::MissingWindows`] | the store was not built for `window` |
    pub fn prune(
        &self,
        window: usize,
        dims: &DimensionSubset,
    ) -> Result<BTreeMap<Label, Vec<Candidate>>, SearchError> {
        let mut pools: BTreeMap<Label, Vec<Candidate>> = BTreeMap::new();
        let mut total = 0usize;
        let mut kept = 0usize;
        for (id, ts, labels) in self.set.iter() {
            if labels.is_empty() {
                continue;
            }
            let windows = self
                .store
                .get(id, window)
                .ok_or(SearchError::MissingWindows { series: id.index(), window })?;
            let offsets = self.offsets(id, window, dims, ts.len())?;
            total += windows.n_windows();
            kept += offsets.len();
            for &offset in &offsets {
                let values = windows.candidate(offset, dims);
                for label in labels {
                    pools.entry(label.clone()).or_default().push(Candidate {
                        series: id,
                        offset,
                        values: values.clone(),
                    });
                }
            }
        }
        debug!(window, dims = %dims, kept, total, "candidates pruned");
        Ok(pools)
    }
}
