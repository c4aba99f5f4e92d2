//! Binary confusion counts and one-vs-rest classification metrics.

use std::fmt;

use crate::error::ClassifyError;

/// Confusion counts of a one-vs-rest label prediction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct BinaryConfusion {
    /// Labeled series predicted as matching.
    pub true_positives: usize,
    /// Unlabeled series predicted as matching.
    pub false_positives: usize,
    /// Unlabeled series predicted as not matching.
    pub true_negatives: usize,
    /// Labeled series predicted as not matching.
    pub false_negatives: usize,
}

impl BinaryConfusion {
    /// Count agreements between `target` and `predicted`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClassifyError::EmptyPredictions`] | zero targets provided |
    /// | [`ClassifyError::PredictionLengthMismatch`] | lengths differ |
    pub fn from_predictions(target: &[bool], predicted: &[bool]) -> Result<Self, ClassifyError> {
        if target.is_empty() {
            return Err(ClassifyError::EmptyPredictions);
        }
        if target.len() != predicted.len() {
            return Err(ClassifyError::PredictionLengthMismatch {
                expected: target.len(),
                got: predicted.len(),
            });
        }
        let mut cm = Self::default();
        for (&t, &p) in target.iter().zip(predicted) {
            match (t, p) {
                (true, true) => cm.true_positives += 1,
                (false, true) => cm.false_positives += 1,
                (false, false) => cm.true_negatives += 1,
                (true, false) => cm.false_negatives += 1,
            }
        }
        Ok(cm)
    }

    /// Total number of predictions.
    #[must_use]
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Number of labeled series.
    #[must_use]
    pub fn support(&self) -> usize {
        self.true_positives + self.false_negatives
    }

    /// Proportion of correct predictions.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// TP / (TP + FP); 0.0 if nothing was predicted positive.
    #[must_use]
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// TP / (TP + FN); 0.0 if no series carries the label.
    #[must_use]
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.support())
    }

    /// Harmonic mean of precision and recall; 0.0 if both are zero.
    #[must_use]
    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl fmt::Display for BinaryConfusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>10} {:>7} {:>7}", "", "pred_1", "pred_0")?;
        writeln!(f, "{:>10} {:>7} {:>7}", "true_1", self.true_positives, self.false_negatives)?;
        writeln!(f, "{:>10} {:>7} {:>7}", "true_0", self.false_positives, self.true_negatives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions() {
        let target = [true, false, true, false];
        let cm = BinaryConfusion::from_predictions(&target, &target).unwrap();
        assert!((cm.accuracy() - 1.0).abs() < f64::EPSILON);
        assert!((cm.precision() - 1.0).abs() < f64::EPSILON);
        assert!((cm.recall() - 1.0).abs() < f64::EPSILON);
        assert!((cm.f1() - 1.0).abs() < f64::EPSILON);
        assert_eq!(cm.support(), 2);
    }

    #[test]
    fn known_counts() {
        let target = [true, true, true, false, false, false];
        let predicted = [true, true, false, true, false, false];
        let cm = BinaryConfusion::from_predictions(&target, &predicted).unwrap();
        assert_eq!(cm.true_positives, 2);
        assert_eq!(cm.false_negatives, 1);
        assert_eq!(cm.false_positives, 1);
        assert_eq!(cm.true_negatives, 2);
        assert!((cm.precision() - 2.0 / 3.0).abs() < 1e-10);
        assert!((cm.recall() - 2.0 / 3.0).abs() < 1e-10);
        assert!((cm.accuracy() - 4.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn no_positive_predictions() {
        let cm = BinaryConfusion::from_predictions(&[true, false], &[false, false]).unwrap();
        assert_eq!(cm.precision(), 0.0);
        assert_eq!(cm.f1(), 0.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            BinaryConfusion::from_predictions(&[], &[]),
            Err(ClassifyError::EmptyPredictions)
        ));
        assert!(matches!(
            BinaryConfusion::from_predictions(&[true], &[true, false]),
            Err(ClassifyError::PredictionLengthMismatch { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn display_formatting() {
        let cm = BinaryConfusion::from_predictions(&[true], &[true]).unwrap();
        let output = format!("{cm}");
        assert!(output.contains("pred_1"));
        assert!(output.contains("true_0"));
    }
}
