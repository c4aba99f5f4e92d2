//! Dimension subsets: which axes a shapelet spans.

use std::fmt;

use crate::error::SeriesError;

/// A sorted, non-empty set of axis indices considered jointly by a shapelet.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct DimensionSubset(Vec<usize>);

impl DimensionSubset {
    /// Create a subset from axis indices. Indices are sorted and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptyDimensionSubset`] if `axes` is empty.
    pub fn new(mut axes: Vec<usize>) -> Result<Self, SeriesError> {
        if axes.is_empty() {
            return Err(SeriesError::EmptyDimensionSubset);
        }
        axes.sort_unstable();
        axes.dedup();
        Ok(Self(axes))
    }

    /// Enumerate every non-empty subset of `0..n_axes`.
    ///
    /// Subsets are ordered by size, then lexicographically, e.g.
    /// `{0}, {1}, {2}, {0,1}, {0,2}, {1,2}, {0,1,2}` for three axes.
    #[must_use]
    pub fn power_set(n_axes: usize) -> Vec<Self> {
        let mut subsets = Vec::new();
        for size in 1..=n_axes {
            let mut combo: Vec<usize> = (0..size).collect();
            loop {
                subsets.push(Self(combo.clone()));

                // Advance to the next combination in lexicographic order.
                let Some(pos) = (0..size).rev().find(|&i| combo[i] < n_axes - size + i) else {
                    break;
                };
                combo[pos] += 1;
                for i in pos + 1..size {
                    combo[i] = combo[i - 1] + 1;
                }
            }
        }
        subsets
    }

    /// Return the axis indices in ascending order.
    #[must_use]
    pub fn axes(&self) -> &[usize] {
        &self.0
    }

    /// Return the number of axes in the subset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a subset holds at least one axis.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that every axis exists in a series with `n_axes` axes.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::AxisOutOfRange`] for the first missing axis.
    pub fn check_axes(&self, n_axes: usize) -> Result<(), SeriesError> {
        match self.0.iter().find(|&&a| a >= n_axes) {
            Some(&axis) => Err(SeriesError::AxisOutOfRange { axis, n_axes }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for DimensionSubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, axis) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{axis}")?;
        }
        f.write_str("}")
    }
}
