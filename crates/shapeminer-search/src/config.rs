//! Configuration builder for shapelet discovery.

use shapeminer_classify::ShapeletModel;

use crate::dataset::TrainingSet;
use crate::error::SearchError;
use crate::finder::SearchOutcome;

/// Configuration for shapelet discovery.
///
/// Construct via [`ShapeletConfig::new`], then chain `with_*` methods to
/// override defaults. Every parameter is validated by [`ShapeletConfig::fit`]
/// before any computation starts.
///
/// # Defaults
///
/// | Parameter   | Default                         |
/// |-------------|---------------------------------|
/// | `d_max`     | 0.6                             |
/// | `n_max`     | 3                               |
/// | `w_ext`     | 25                              |
/// | `sigma_min` | `None` (estimated from unlabeled series) |
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeletConfig {
    pub(crate) sl_max: usize,
    pub(crate) d_max: f64,
    pub(crate) n_max: usize,
    pub(crate) w_ext: usize,
    pub(crate) sigma_min: Option<f64>,
}

impl ShapeletConfig {
    /// Create a configuration with maximum shapelet length `sl_max`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SearchError::ZeroSlMax`] | `sl_max` is zero |
    pub fn new(sl_max: usize) -> Result<Self, SearchError> {
        if sl_max == 0 {
            return Err(SearchError::ZeroSlMax);
        }
        Ok(Self {
            sl_max,
            d_max: 0.6,
            n_max: 3,
            w_ext: 25,
            sigma_min: None,
        })
    }

    /// Set the clustering radius.
    #[must_use]
    pub fn with_d_max(mut self, d_max: f64) -> Self {
        self.d_max = d_max;
        self
    }

    /// Set how many window lengths between 0 and `sl_max` are tried.
    #[must_use]
    pub fn with_n_max(mut self, n_max: usize) -> Self {
        self.n_max = n_max;
        self
    }

    /// Set the minimum separation between detected extrema.
    #[must_use]
    pub fn with_w_ext(mut self, w_ext: usize) -> Self {
        self.w_ext = w_ext;
        self
    }

    /// Fix the z-normalization noise floor; `None` estimates it from the
    /// unlabeled training series.
    #[must_use]
    pub fn with_sigma_min(mut self, sigma_min: Option<f64>) -> Self {
        self.sigma_min = sigma_min;
        self
    }

    /// Return the maximum shapelet length.
    #[must_use]
    pub fn sl_max(&self) -> usize {
        self.sl_max
    }

    /// Return the clustering radius.
    #[must_use]
    pub fn d_max(&self) -> f64 {
        self.d_max
    }

    /// Return the number of window lengths.
    #[must_use]
    pub fn n_max(&self) -> usize {
        self.n_max
    }

    /// Return the extrema separation.
    #[must_use]
    pub fn w_ext(&self) -> usize {
        self.w_ext
    }

    /// Return the fixed noise floor, if any.
    #[must_use]
    pub fn sigma_min(&self) -> Option<f64> {
        self.sigma_min
    }

    /// Check every parameter against `set`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SearchError::ZeroSlMax`] | `sl_max` is zero |
    /// | [`SearchError::InvalidNMax`] | `n_max` is zero |
    /// | [`SearchError::NMaxExceedsSlMax`] | `n_max > sl_max` |
    /// | [`SearchError::InvalidDMax`] | `d_max` is not positive and finite |
    /// | [`SearchError::ZeroWExt`] | `w_ext` is zero |
    /// | [`SearchError::InvalidSigmaMin`] | `sigma_min` is negative or not finite |
    /// | [`SearchError::SlMaxExceedsSeries`] | `sl_max` exceeds the shortest series |
    pub fn validate(&self, set: &TrainingSet) -> Result<(), SearchError> {
        if self.sl_max == 0 {
            return Err(SearchError::ZeroSlMax);
        }
        if self.n_max == 0 {
            return Err(SearchError::InvalidNMax { n_max: self.n_max });
        }
        if self.n_max > self.sl_max {
            return Err(SearchError::NMaxExceedsSlMax {
                n_max: self.n_max,
                sl_max: self.sl_max,
            });
        }
        if !self.d_max.is_finite() || self.d_max <= 0.0 {
            return Err(SearchError::InvalidDMax { d_max: self.d_max });
        }
        if self.w_ext == 0 {
            return Err(SearchError::ZeroWExt);
        }
        if let Some(sigma_min) = self.sigma_min
            && (!sigma_min.is_finite() || sigma_min < 0.0)
        {
            return Err(SearchError::InvalidSigmaMin { sigma_min });
        }
        let min_len = set.min_len();
        if self.sl_max > min_len {
            return Err(SearchError::SlMaxExceedsSeries {
                sl_max: self.sl_max,
                min_len,
            });
        }
        Ok(())
    }

    /// Discover the best shapelet classifier of every label in `set`.
    ///
    /// # Errors
    ///
    /// Any [`ShapeletConfig::validate`] error, raised before computation,
    /// or an error propagated from the pipeline stages.
    pub fn fit(&self, set: &TrainingSet) -> Result<ShapeletModel, SearchError> {
        Ok(self.fit_with_summary(set)?.model)
    }

    /// Like [`ShapeletConfig::fit`], also returning run statistics.
    ///
    /// # Errors
    ///
    /// Same as [`ShapeletConfig::fit`].
    pub fn fit_with_summary(&self, set: &TrainingSet) -> Result<SearchOutcome, SearchError> {
        crate::finder::search(self, set)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use shapeminer_series::TimeSeries;

    use super::*;

    fn set(len: usize) -> TrainingSet {
        TrainingSet::new(
            vec![TimeSeries::new(vec![vec![0.0; len]]).unwrap()],
            vec![BTreeSet::new()],
        )
        .unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = ShapeletConfig::new(50).unwrap();
        assert_eq!(cfg.d_max(), 0.6);
        assert_eq!(cfg.n_max(), 3);
        assert_eq!(cfg.w_ext(), 25);
        assert_eq!(cfg.sigma_min(), None);
        assert!(cfg.validate(&set(50)).is_ok());
    }

    #[test]
    fn rejects_zero_sl_max() {
        assert!(matches!(ShapeletConfig::new(0), Err(SearchError::ZeroSlMax)));
    }

    #[test]
    fn rejects_bad_parameters() {
        let base = ShapeletConfig::new(10).unwrap();
        let s = set(20);
        assert!(matches!(
            base.clone().with_n_max(0).validate(&s),
            Err(SearchError::InvalidNMax { n_max: 0 })
        ));
        assert!(matches!(
            base.clone().with_n_max(11).validate(&s),
            Err(SearchError::NMaxExceedsSlMax { n_max: 11, sl_max: 10 })
        ));
        for d in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                base.clone().with_d_max(d).validate(&s),
                Err(SearchError::InvalidDMax { .. })
            ));
        }
        assert!(matches!(base.clone().with_w_ext(0).validate(&s), Err(SearchError::ZeroWExt)));
        for sigma in [-1.0, f64::NAN] {
            assert!(matches!(
                base.clone().with_sigma_min(Some(sigma)).validate(&s),
                Err(SearchError::InvalidSigmaMin { .. })
            ));
        }
        assert!(base.clone().with_sigma_min(Some(0.0)).validate(&s).is_ok());
    }

    #[test]
    fn rejects_sl_max_longer_than_shortest_series() {
        let cfg = ShapeletConfig::new(10).unwrap();
        assert!(matches!(
            cfg.validate(&set(9)),
            Err(SearchError::SlMaxExceedsSeries { sl_max: 10, min_len: 9 })
        ));
        assert!(cfg.validate(&set(10)).is_ok());
    }
}
