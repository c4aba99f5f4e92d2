//! Error types for series validation, subsequence extraction and distance computation.

/// Errors from time series construction and subsequence operations.
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    /// Returned when a series has no time steps.
    #[error("time series must be non-empty")]
    EmptySeries,

    /// Returned when a series is constructed without any axis.
    #[error("time series must have at least one axis")]
    NoAxes,

    /// Returned when the axes of a series differ in length.
    #[error("axis {axis} has {got} samples, expected {expected}")]
    RaggedAxes {
        /// The offending axis.
        axis: usize,
        /// Length of the first axis.
        expected: usize,
        /// Length of the offending axis.
        got: usize,
    },

    /// Returned when a time-ordered row has a different width than the first row.
    #[error("row {row} has {got} values, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        got: usize,
    },

    /// Returned when a series contains NaN, infinity, or negative infinity.
    #[error("time series contains non-finite value on axis {axis} at index {index}")]
    NonFiniteValue {
        /// Axis of the first non-finite value found.
        axis: usize,
        /// Time index of the first non-finite value found.
        index: usize,
    },

    /// Returned when a subsequence window of length zero is requested.
    #[error("window length must be at least 1")]
    ZeroWindow,

    /// Returned when the window is longer than the series.
    #[error("window length {window} exceeds series length {len}")]
    WindowTooLong {
        /// The requested window length.
        window: usize,
        /// The series length.
        len: usize,
    },

    /// Returned when a dimension subset contains no axis.
    #[error("dimension subset must contain at least one axis")]
    EmptyDimensionSubset,

    /// Returned when a dimension subset references an axis the series does not have.
    #[error("axis {axis} out of range for series with {n_axes} axes")]
    AxisOutOfRange {
        /// The referenced axis.
        axis: usize,
        /// Number of axes available.
        n_axes: usize,
    },

    /// Returned when an extrema lookup names a series outside the indexed collection.
    #[error("series {series} out of range for a collection of {n_series} series")]
    UnknownSeries {
        /// The requested series index.
        series: usize,
        /// Number of series in the collection.
        n_series: usize,
    },

    /// Returned when a shapelet's flattened length does not match `window * dims`.
    #[error("shapelet has {got} values, expected {expected}")]
    ShapeletLengthMismatch {
        /// Expected flattened length.
        expected: usize,
        /// Actual flattened length.
        got: usize,
    },
}
