/// Errors from radius clustering.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// Returned when the clustering radius is not a positive finite number.
    #[error("clustering radius must be positive and finite, got {d_max}")]
    InvalidRadius {
        /// The rejected radius.
        d_max: f64,
    },

    /// Returned when candidates to be clustered differ in length.
    #[error("candidate {index} has {got} values, expected {expected}")]
    CandidateLengthMismatch {
        /// Position of the offending candidate in the input slice.
        index: usize,
        /// Length of the first candidate.
        expected: usize,
        /// Length of the offending candidate.
        got: usize,
    },
}
