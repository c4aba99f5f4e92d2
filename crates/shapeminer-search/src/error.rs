use shapeminer_classify::ClassifyError;
use shapeminer_cluster::ClusterError;
use shapeminer_series::{DimensionSubset, Label, SeriesError};

/// Errors from shapelet discovery.
///
/// Configuration and training-set errors are raised upfront, before any
/// computation starts.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Returned when the maximum shapelet length is zero.
    #[error("sl_max must be at least 1")]
    ZeroSlMax,

    /// Returned when the number of window lengths is zero.
    #[error("n_max must be at least 1, got {n_max}")]
    InvalidNMax {
        /// The rejected value.
        n_max: usize,
    },

    /// Returned when more window lengths are requested than `sl_max` allows.
    #[error("n_max ({n_max}) must not exceed sl_max ({sl_max})")]
    NMaxExceedsSlMax {
        /// Number of window lengths requested.
        n_max: usize,
        /// Maximum shapelet length.
        sl_max: usize,
    },

    /// Returned when the clustering radius is not positive and finite.
    #[error("d_max must be positive and finite, got {d_max}")]
    InvalidDMax {
        /// The rejected radius.
        d_max: f64,
    },

    /// Returned when the extrema separation is zero.
    #[error("w_ext must be at least 1")]
    ZeroWExt,

    /// Returned when an explicit noise floor is negative or not finite.
    #[error("sigma_min must be finite and non-negative, got {sigma_min}")]
    InvalidSigmaMin {
        /// The rejected noise floor.
        sigma_min: f64,
    },

    /// Returned when the maximum shapelet length exceeds the shortest series.
    #[error("sl_max ({sl_max}) exceeds the shortest series length ({min_len})")]
    SlMaxExceedsSeries {
        /// Maximum shapelet length.
        sl_max: usize,
        /// Length of the shortest training series.
        min_len: usize,
    },

    /// Returned when the training set holds no series.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// Returned when series and label collections differ in length.
    #[error("got {n_labels} label sets for {n_series} series")]
    LabelCountMismatch {
        /// Number of series.
        n_series: usize,
        /// Number of label sets.
        n_labels: usize,
    },

    /// Returned when a series has a different axis count than the first.
    #[error("series {series} has {got} axes, expected {expected}")]
    AxisCountMismatch {
        /// Index of the offending series.
        series: usize,
        /// Axis count of the first series.
        expected: usize,
        /// Axis count of the offending series.
        got: usize,
    },

    /// Returned when the subsequence store holds no entry for a series and window.
    #[error("no normalized subsequences for series {series} at window {window}")]
    MissingWindows {
        /// The series index.
        series: usize,
        /// The requested window.
        window: usize,
    },

    /// Returned when a pooled shapelet has no distance to some training series.
    #[error("missing best-matching distances for label {label}, dims {dims}, window {window}")]
    MissingDistances {
        /// Label of the pool.
        label: Label,
        /// Dimension subset of the pool.
        dims: DimensionSubset,
        /// Window of the pool.
        window: usize,
    },

    /// Wraps a series error.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Wraps a clustering error.
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// Wraps a classifier error.
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}
