use std::path::PathBuf;

use shapeminer_series::SeriesError;

/// Errors from threshold fitting, prediction and model persistence.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// Returned when a threshold is fitted on zero distances.
    #[error("cannot fit a threshold on an empty target")]
    EmptyTarget,

    /// Returned when the distance vector and the target differ in length.
    #[error("got {got} distances for a target of length {expected}")]
    TargetLengthMismatch {
        /// Length of the target vector.
        expected: usize,
        /// Number of distances supplied.
        got: usize,
    },

    /// Returned when a best-matching distance is NaN or infinite.
    #[error("non-finite distance at series {index}")]
    NonFiniteDistance {
        /// Position of the offending distance.
        index: usize,
    },

    /// Returned when a classifier window of zero is requested.
    #[error("classifier window must be at least 1")]
    ZeroWindow,

    /// Returned when the noise floor is negative or not finite.
    #[error("sigma_min must be finite and non-negative, got {sigma_min}")]
    InvalidSigmaMin {
        /// The rejected noise floor.
        sigma_min: f64,
    },

    /// Returned when a flattened shapelet does not hold `window` values per axis.
    #[error("shapelet has {got} values, expected {expected} ({n_axes} axes of {window})")]
    ShapeletLengthMismatch {
        /// Expected flattened length.
        expected: usize,
        /// Actual flattened length.
        got: usize,
        /// Number of axes in the dimension subset.
        n_axes: usize,
        /// Classifier window.
        window: usize,
    },

    /// Returned when confusion counts are requested for zero predictions.
    #[error("cannot evaluate zero predictions")]
    EmptyPredictions,

    /// Returned when the prediction and target vectors differ in length.
    #[error("got {got} predictions for {expected} targets")]
    PredictionLengthMismatch {
        /// Number of targets.
        expected: usize,
        /// Number of predictions.
        got: usize,
    },

    /// Wraps a series error raised while normalizing or scanning a series.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Returned when model serialization fails.
    #[error("failed to serialize model")]
    SerializeModel {
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when model deserialization fails.
    #[error("failed to deserialize model from {path}")]
    DeserializeModel {
        /// Path to the model file that could not be deserialized.
        path: PathBuf,
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when writing the model file fails.
    #[error("failed to write model to {path}")]
    WriteModel {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when reading the model file fails.
    #[error("failed to read model from {path}")]
    ReadModel {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when loading a model with an incompatible format version.
    #[error("incompatible model version in {path}: expected {expected}, found {found}")]
    IncompatibleModelVersion {
        /// The model format version this build expects.
        expected: u32,
        /// The model format version found in the file.
        found: u32,
        /// Path to the model file with the incompatible version.
        path: PathBuf,
    },

    /// Returned when the label index of a model file disagrees with its body.
    #[error("corrupt model in {path}: header lists {header} labels, body holds {body}")]
    ModelLabelMismatch {
        /// Labels listed in the envelope header.
        header: usize,
        /// Labels held by the decoded model.
        body: usize,
        /// Path to the model file.
        path: PathBuf,
    },
}
