//! Attaching label sets to a series dataset.

use std::collections::{BTreeSet, HashMap};

use shapeminer_search::{SearchError, TrainingSet};
use shapeminer_series::{Label, TimeSeries};
use tracing::{info, instrument, warn};

use crate::IoError;
use crate::domain::{Dataset, LabelTable, SeriesName};

/// A dataset whose series carry zero or more labels each.
///
/// `names[i]`, `series[i]` and `labels[i]` describe the same series. Series
/// with an empty label set are unlabeled background.
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    names: Vec<SeriesName>,
    series: Vec<TimeSeries>,
    labels: Vec<BTreeSet<Label>>,
}

impl LabeledDataset {
    /// Return the series identifiers.
    #[must_use]
    pub fn names(&self) -> &[SeriesName] {
        &self.names
    }

    /// Return the series.
    #[must_use]
    pub fn series(&self) -> &[TimeSeries] {
        &self.series
    }

    /// Return the label set of every series.
    #[must_use]
    pub fn labels(&self) -> &[BTreeSet<Label>] {
        &self.labels
    }

    /// Return the number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Return true if the dataset holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Return the number of series without any label.
    #[must_use]
    pub fn n_unlabeled(&self) -> usize {
        self.labels.iter().filter(|l| l.is_empty()).count()
    }

    /// Split into identifiers, series and label sets.
    #[must_use]
    pub fn into_parts(self) -> (Vec<SeriesName>, Vec<TimeSeries>, Vec<BTreeSet<Label>>) {
        (self.names, self.series, self.labels)
    }

    /// Validate into a [`TrainingSet`], keeping the identifiers alongside.
    ///
    /// # Errors
    ///
    /// Propagates [`TrainingSet::new`] validation errors.
    pub fn into_training_set(self) -> Result<(Vec<SeriesName>, TrainingSet), SearchError> {
        let set = TrainingSet::new(self.series, self.labels)?;
        Ok((self.names, set))
    }
}

/// Attach the labels of `table` to the series of `dataset` for training.
///
/// Series without a label row stay unlabeled. Label rows naming a series that
/// is not in the dataset are dropped with a warning; duplicate rows collapse.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::NoLabeledSeries`] | No label row matches a series of the dataset |
pub fn align(dataset: Dataset, table: &LabelTable) -> Result<LabeledDataset, IoError> {
    let aligned = attach_labels(dataset, table);
    if aligned.n_unlabeled() == aligned.len() {
        return Err(IoError::NoLabeledSeries {
            n_rows: table.len(),
        });
    }
    Ok(aligned)
}

/// Attach the labels of `table` to the series of `dataset`, accepting a
/// dataset in which no series carries a label.
///
/// Scoring a held-out set of background series uses this form: every target
/// is then negative.
#[instrument(skip_all, fields(n_series = dataset.len(), n_rows = table.len()))]
pub fn attach_labels(dataset: Dataset, table: &LabelTable) -> LabeledDataset {
    let lookup: HashMap<&str, usize> = dataset
        .names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut labels = vec![BTreeSet::new(); dataset.len()];
    let mut n_dropped = 0usize;
    for (name, label) in table.rows() {
        match lookup.get(name.as_str()) {
            Some(&i) => {
                labels[i].insert(label.clone());
            }
            None => n_dropped += 1,
        }
    }

    if n_dropped > 0 {
        warn!(n_dropped, "dropped label rows for series not in the dataset");
    }

    let aligned = LabeledDataset {
        names: dataset.names,
        series: dataset.series,
        labels,
    };
    info!(
        n_labeled = aligned.len() - aligned.n_unlabeled(),
        n_unlabeled = aligned.n_unlabeled(),
        "alignment complete"
    );
    aligned
}
