//! The discovery output: one best classifier per label.

use std::collections::BTreeMap;

use shapeminer_series::{Label, TimeSeries};

use crate::classifier::{Classifier, Prediction};
use crate::error::ClassifyError;

/// The winning classifier of one label and the training target it was fit on.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LabelModel {
    /// Best classifier found for the label.
    pub classifier: Classifier,
    /// One-vs-rest training target, one entry per training series.
    pub target: Vec<bool>,
}

/// Per-label classifiers, keyed and iterated in label order.
///
/// Labels for which no candidate shapelet existed are absent.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeletModel {
    models: BTreeMap<Label, LabelModel>,
}

impl ShapeletModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the model of `label`.
    pub fn insert(&mut self, label: Label, model: LabelModel) -> Option<LabelModel> {
        self.models.insert(label, model)
    }

    /// Return the model of `label`, if one was found.
    #[must_use]
    pub fn get(&self, label: &Label) -> Option<&LabelModel> {
        self.models.get(label)
    }

    /// Iterate over `(label, model)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&Label, &LabelModel)> + '_ {
        self.models.iter()
    }

    /// Iterate over the labels that have a classifier.
    pub fn labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.models.keys()
    }

    /// Return the number of labels with a classifier.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Return true if no label has a classifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Predict `series` against every label's classifier.
    ///
    /// # Errors
    ///
    /// Propagates the first [`Classifier::predict`] error.
    pub fn predict(&self, series: &TimeSeries) -> Result<BTreeMap<Label, Prediction>, ClassifyError> {
        self.models
            .iter()
            .map(|(label, m)| Ok((label.clone(), m.classifier.predict(series)?)))
            .collect()
    }
}

impl FromIterator<(Label, LabelModel)> for ShapeletModel {
    fn from_iter<I: IntoIterator<Item = (Label, LabelModel)>>(iter: I) -> Self {
        Self {
            models: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use shapeminer_series::DimensionSubset;

    use super::*;
    use crate::classifier::ClassifierBuilder;

    fn sample_model() -> ShapeletModel {
        let builder =
            ClassifierBuilder::new(DimensionSubset::new(vec![0]).unwrap(), 2, 100.0).unwrap();
        let target = vec![true, false, false];
        let a = builder.fit(&[1.0, 2.0], &[0.0, 3.0, 4.0], &target).unwrap();
        let b = builder.fit(&[9.0, 9.5], &[5.0, 0.2, 0.1], &[false, true, true]).unwrap();
        [
            (Label::from("A"), LabelModel { classifier: a, target }),
            (
                Label::from("B"),
                LabelModel {
                    classifier: b,
                    target: vec![false, true, true],
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn labels_are_ordered() {
        let model = sample_model();
        let labels: Vec<&str> = model.labels().map(Label::as_str).collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert_eq!(model.len(), 2);
        assert!(model.get(&Label::from("C")).is_none());
    }

    #[test]
    fn predict_every_label() {
        let model = sample_model();
        let series = TimeSeries::new(vec![vec![1.0, 2.0, 7.0]]).unwrap();
        let predictions = model.predict(&series).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[&Label::from("A")].min, 0.0);
        assert!(predictions[&Label::from("B")].min > 1.0);
    }
}
