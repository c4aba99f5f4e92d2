//! Shapelet threshold classifiers: fitting, comparison and prediction.

use std::cmp::Ordering;

use rayon::prelude::*;
use shapeminer_series::{DimensionSubset, NormalizedWindows, TimeSeries, distance_profile};

use crate::error::ClassifyError;
use crate::gain::InformationGain;
use crate::threshold::{ThresholdFit, fit_threshold};

/// Fits [`Classifier`]s for shapelets of one dimension subset and window.
///
/// Construct via [`ClassifierBuilder::new`], then call
/// [`ClassifierBuilder::fit`] once per shapelet.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierBuilder {
    dims: DimensionSubset,
    window: usize,
    sigma_min: f64,
}

impl ClassifierBuilder {
    /// Create a builder for shapelets spanning `dims` with `window` samples
    /// per axis, normalized with noise floor `sigma_min`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClassifyError::ZeroWindow`] | `window == 0` |
    /// | [`ClassifyError::InvalidSigmaMin`] | `sigma_min` is negative or not finite |
    pub fn new(dims: DimensionSubset, window: usize, sigma_min: f64) -> Result<Self, ClassifyError> {
        if window == 0 {
            return Err(ClassifyError::ZeroWindow);
        }
        if !sigma_min.is_finite() || sigma_min < 0.0 {
            return Err(ClassifyError::InvalidSigmaMin { sigma_min });
        }
        Ok(Self {
            dims,
            window,
            sigma_min,
        })
    }

    /// Fit a classifier for a flattened (axis-major) `shapelet` from its
    /// best-matching distances to every training series.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClassifyError::ShapeletLengthMismatch`] | `shapelet.len() != window * dims.len()` |
    /// | [`ClassifyError::EmptyTarget`] | `target` is empty |
    /// | [`ClassifyError::TargetLengthMismatch`] | `bmds` and `target` differ in length |
    /// | [`ClassifyError::NonFiniteDistance`] | a distance is NaN or infinite |
    pub fn fit(
        &self,
        shapelet: &[f64],
        bmds: &[f64],
        target: &[bool],
    ) -> Result<Classifier, ClassifyError> {
        let expected = self.window * self.dims.len();
        if shapelet.len() != expected {
            return Err(ClassifyError::ShapeletLengthMismatch {
                expected,
                got: shapelet.len(),
                n_axes: self.dims.len(),
                window: self.window,
            });
        }
        let threshold = fit_threshold(bmds, target)?;
        Ok(Classifier {
            shapelet: shapelet.chunks_exact(self.window).map(<[f64]>::to_vec).collect(),
            dims: self.dims.clone(),
            window: self.window,
            threshold,
            sigma_min: self.sigma_min,
        })
    }
}

/// A shapelet with a fitted distance threshold.
///
/// A series is predicted to carry the label when its best-matching distance
/// to the shapelet is strictly below [`Classifier::delta`]. Immutable once fit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Classifier {
    shapelet: Vec<Vec<f64>>,
    dims: DimensionSubset,
    window: usize,
    threshold: ThresholdFit,
    sigma_min: f64,
}

impl Classifier {
    /// Return the shapelet values, one vector per axis of [`Classifier::dims`].
    #[must_use]
    pub fn shapelet(&self) -> &[Vec<f64>] {
        &self.shapelet
    }

    /// Return the shapelet flattened axis after axis.
    #[must_use]
    pub fn flattened(&self) -> Vec<f64> {
        self.shapelet.concat()
    }

    /// Return the axes the shapelet spans.
    #[must_use]
    pub fn dims(&self) -> &DimensionSubset {
        &self.dims
    }

    /// Return the shapelet length per axis.
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Return the decision threshold.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.threshold.delta()
    }

    /// Return the information gain of the fitted split.
    #[must_use]
    pub fn gain(&self) -> InformationGain {
        self.threshold.gain()
    }

    /// Return the class margin at the threshold (`+inf` when undefined).
    #[must_use]
    pub fn f_c_delta(&self) -> f64 {
        self.threshold.f_c_delta()
    }

    /// Return the normalization noise floor used in training.
    #[must_use]
    pub fn sigma_min(&self) -> f64 {
        self.sigma_min
    }

    /// Order classifiers by quality: higher gain is greater, and on equal
    /// gain the smaller class margin is greater.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.threshold.compare(&other.threshold)
    }

    /// Return true if `self` is strictly better than `other`.
    #[must_use]
    pub fn beats(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Greater
    }

    /// Distance from the shapelet to every subsequence of `series`.
    ///
    /// The series is normalized with the training noise floor.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClassifyError::Series`] | `series` is shorter than the window or lacks an axis in `dims` |
    pub fn predict(&self, series: &TimeSeries) -> Result<Prediction, ClassifyError> {
        self.dims.check_axes(series.n_axes())?;
        let windows = NormalizedWindows::new(series, self.window, self.sigma_min)?;
        let distances = distance_profile(&self.flattened(), &windows, &self.dims)?;
        Ok(Prediction::from_distances(distances))
    }

    /// Predict every series in parallel, preserving input order.
    ///
    /// # Errors
    ///
    /// Propagates the first error of [`Classifier::predict`].
    pub fn predict_many(&self, series: &[TimeSeries]) -> Result<Vec<Prediction>, ClassifyError> {
        series.par_iter().map(|s| self.predict(s)).collect()
    }

    /// Return true if the best-matching distance to `series` is below `delta`.
    ///
    /// # Errors
    ///
    /// Same as [`Classifier::predict`].
    pub fn matches(&self, series: &TimeSeries) -> Result<bool, ClassifyError> {
        Ok(self.predict(series)?.is_match(self.delta()))
    }

    /// Return true if any subsequence of `series` lies closer than `delta`,
    /// i.e. the process the series records is considered successful.
    ///
    /// # Errors
    ///
    /// Same as [`Classifier::predict`].
    pub fn any_below_threshold(&self, series: &TimeSeries) -> Result<bool, ClassifyError> {
        Ok(self.predict(series)?.any_below(self.delta()))
    }
}

/// Distance profile of one series against a classifier's shapelet.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Prediction {
    /// Distance at every subsequence offset.
    pub distances: Vec<f64>,
    /// Best-matching distance (minimum of `distances`).
    pub min: f64,
    /// Offset of the first subsequence achieving `min`.
    pub best_offset: usize,
}

impl Prediction {
    fn from_distances(distances: Vec<f64>) -> Self {
        let (best_offset, min) = distances
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::INFINITY), |best, (i, d)| if d < best.1 { (i, d) } else { best });
        Self {
            distances,
            min,
            best_offset,
        }
    }

    /// Return true if the best-matching distance is strictly below `delta`.
    #[must_use]
    pub fn is_match(&self, delta: f64) -> bool {
        self.min < delta
    }

    /// Return true if any single distance is strictly below `delta`.
    #[must_use]
    pub fn any_below(&self, delta: f64) -> bool {
        self.distances.iter().any(|&d| d < delta)
    }
}
