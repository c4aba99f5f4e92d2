//! I/O error types for shapeminer-io.

use std::path::PathBuf;

/// Errors from file I/O, CSV parsing, alignment, and result serialization.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the CSV file contains a header but zero data rows.
    #[error("empty dataset (no data rows) in {path}")]
    EmptyDataset {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a series file header has no axis column after `series_id`.
    #[error("no axis columns in {path}: header needs series_id plus at least one axis")]
    NoAxisColumns {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a data row has a different number of columns than the header.
    #[error(
        "inconsistent row length in {path}: row {row_index} (series {series_id}) has {got} columns, expected {expected}"
    )]
    InconsistentRowLength {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Series ID of the offending row.
        series_id: String,
        /// Expected number of columns (from header).
        expected: usize,
        /// Actual number of columns in this row.
        got: usize,
    },

    /// Returned when a cell value is NaN, Inf, or otherwise not a finite float.
    #[error("non-finite value in {path}: row {row_index}, column {col_index}, raw value \"{raw}\"")]
    NonFiniteValue {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Zero-based column index (excluding the series_id column).
        col_index: usize,
        /// The raw string value that failed to parse.
        raw: String,
    },

    /// Returned when a row has an empty series ID.
    #[error("empty series ID in {path} at row {row_index}")]
    EmptySeriesId {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
    },

    /// Returned when the rows of one series are interrupted by another series.
    #[error(
        "series \"{series_id}\" in {path} is not contiguous: block starting at row {first_row} resumes at row {row_index}"
    )]
    NonContiguousSeries {
        /// Path to the CSV file.
        path: PathBuf,
        /// The split series ID.
        series_id: String,
        /// Zero-based row index where the series first appeared.
        first_row: usize,
        /// Zero-based row index where it appeared again.
        row_index: usize,
    },

    /// Returned when a label row carries an empty label.
    #[error("empty label in {path} at row {row_index}")]
    EmptyLabel {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
    },

    /// Returned when the series of a file cannot form a valid time series.
    #[error("invalid series \"{series_id}\" in {path}")]
    InvalidSeries {
        /// Path to the CSV file.
        path: PathBuf,
        /// The offending series ID.
        series_id: String,
        /// Underlying validation error.
        source: shapeminer_series::SeriesError,
    },

    /// Returned when no label row refers to a series of the dataset.
    #[error("no series in the dataset carries a label ({n_rows} label rows, none matched)")]
    NoLabeledSeries {
        /// Number of label rows that were considered.
        n_rows: usize,
    },

    /// Returned when the experiment name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid experiment name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidExperimentName {
        /// The invalid name.
        name: String,
    },

    /// Returned when evaluation inputs have different lengths.
    #[error("evaluation length mismatch: {n_series} series names but {n_predictions} prediction rows")]
    EvaluationLengthMismatch {
        /// Number of series names.
        n_series: usize,
        /// Number of per-series prediction maps.
        n_predictions: usize,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a result artifact cannot be encoded as JSON.
    #[error("cannot encode {path} as JSON")]
    EncodeJson {
        /// Path of the artifact.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Returned when a result file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
