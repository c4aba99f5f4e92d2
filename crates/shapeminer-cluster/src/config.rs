//! Configuration for radius clustering.

use crate::error::ClusterError;
use crate::result::ClusterResult;

/// Radius clustering: every member lies within `d_max` of its representative.
///
/// Construct via [`RadiusClustering::new`], then call [`RadiusClustering::fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusClustering {
    pub(crate) d_max: f64,
}

impl RadiusClustering {
    /// Create a clustering configuration with radius `d_max`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClusterError::InvalidRadius`] | `d_max` is not positive or not finite |
    pub fn new(d_max: f64) -> Result<Self, ClusterError> {
        if !d_max.is_finite() || d_max <= 0.0 {
            return Err(ClusterError::InvalidRadius { d_max });
        }
        Ok(Self { d_max })
    }

    /// Return the clustering radius.
    #[must_use]
    pub fn d_max(&self) -> f64 {
        self.d_max
    }

    /// Cluster equal-length `candidates`.
    ///
    /// Representatives are chosen greedily as the remaining candidate with the
    /// most remaining neighbors (Euclidean distance `<= d_max`), ties going to
    /// the lowest input index. The result depends only on the input order.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClusterError::CandidateLengthMismatch`] | candidates differ in length |
    pub fn fit<S: AsRef<[f64]> + Sync>(
        &self,
        candidates: &[S],
    ) -> Result<ClusterResult, ClusterError> {
        if let Some(first) = candidates.first() {
            let expected = first.as_ref().len();
            if let Some((index, c)) = candidates
                .iter()
                .enumerate()
                .find(|(_, c)| c.as_ref().len() != expected)
            {
                return Err(ClusterError::CandidateLengthMismatch {
                    index,
                    expected,
                    got: c.as_ref().len(),
                });
            }
        }
        Ok(crate::radius::cluster(candidates, self.d_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_radius() {
        for d in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                RadiusClustering::new(d),
                Err(ClusterError::InvalidRadius { .. })
            ));
        }
        assert_eq!(RadiusClustering::new(0.6).unwrap().d_max(), 0.6);
    }

    #[test]
    fn rejects_mixed_lengths() {
        let cfg = RadiusClustering::new(1.0).unwrap();
        let result = cfg.fit(&[vec![0.0, 0.0], vec![1.0, 1.0], vec![1.0]]);
        assert!(matches!(
            result,
            Err(ClusterError::CandidateLengthMismatch { index: 2, expected: 2, got: 1 })
        ));
    }
}
