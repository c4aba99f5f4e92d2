//! Multivariate time series types with validation guarantees.

use std::fmt;

use crate::error::SeriesError;

/// Position of a series inside a training collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesId(usize);

impl SeriesId {
    /// Create a series id from a zero-based collection index.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based collection index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owned, validated multivariate time series.
///
/// Stored column-major: one vector per axis, all of equal length. Guaranteed
/// to have at least one axis and one time step, with all values finite.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    axes: Vec<Vec<f64>>,
}

impl TimeSeries {
    /// Create a series from per-axis value vectors.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SeriesError::NoAxes`] | `axes` is empty |
    /// | [`SeriesError::EmptySeries`] | the first axis has no values |
    /// | [`SeriesError::RaggedAxes`] | axes differ in length |
    /// | [`SeriesError::NonFiniteValue`] | any value is NaN or infinite |
    pub fn new(axes: Vec<Vec<f64>>) -> Result<Self, SeriesError> {
        let first = axes.first().ok_or(SeriesError::NoAxes)?;
        let expected = first.len();
        if expected == 0 {
            return Err(SeriesError::EmptySeries);
        }
        for (axis, values) in axes.iter().enumerate() {
            if values.len() != expected {
                return Err(SeriesError::RaggedAxes {
                    axis,
                    expected,
                    got: values.len(),
                });
            }
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(SeriesError::NonFiniteValue { axis, index });
            }
        }
        Ok(Self { axes })
    }

    /// Create a series from time-ordered rows, one value per axis in each row.
    ///
    /// # Errors
    ///
    /// Same as [`TimeSeries::new`], plus [`SeriesError::RaggedRow`] when a
    /// row's width differs from the first row.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, SeriesError> {
        let first = rows.first().ok_or(SeriesError::EmptySeries)?;
        let n_axes = first.len();
        if n_axes == 0 {
            return Err(SeriesError::NoAxes);
        }
        let mut axes = vec![Vec::with_capacity(rows.len()); n_axes];
        for (t, row) in rows.iter().enumerate() {
            if row.len() != n_axes {
                return Err(SeriesError::RaggedRow {
                    row: t,
                    expected: n_axes,
                    got: row.len(),
                });
            }
            for (axis, &v) in row.iter().enumerate() {
                axes[axis].push(v);
            }
        }
        Self::new(axes)
    }

    /// Return the number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.axes[0].len()
    }

    /// Return true if the series has no time steps.
    ///
    /// Always `false` for a validated series; provided to satisfy the
    /// `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes[0].is_empty()
    }

    /// Return the number of axes.
    #[must_use]
    pub fn n_axes(&self) -> usize {
        self.axes.len()
    }

    /// Borrow the values of one axis, or `None` if the axis does not exist.
    #[must_use]
    pub fn axis(&self, axis: usize) -> Option<&[f64]> {
        self.axes.get(axis).map(Vec::as_slice)
    }

    /// Borrow the values of one axis.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::AxisOutOfRange`] if the axis does not exist.
    pub fn try_axis(&self, axis: usize) -> Result<&[f64], SeriesError> {
        self.axis(axis).ok_or(SeriesError::AxisOutOfRange {
            axis,
            n_axes: self.n_axes(),
        })
    }

    /// Iterate over the axes in index order.
    pub fn axes(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.axes.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_no_axes() {
        assert!(matches!(TimeSeries::new(vec![]), Err(SeriesError::NoAxes)));
    }

    #[test]
    fn rejects_empty_axis() {
        assert!(matches!(
            TimeSeries::new(vec![vec![]]),
            Err(SeriesError::EmptySeries)
        ));
    }

    #[test]
    fn rejects_ragged_axes() {
        let result = TimeSeries::new(vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0]]);
        assert!(matches!(
            result,
            Err(SeriesError::RaggedAxes { axis: 1, expected: 3, got: 2 })
        ));
    }

    #[test]
    fn rejects_nan_with_position() {
        let result = TimeSeries::new(vec![vec![1.0, 2.0], vec![0.0, f64::NAN]]);
        assert!(matches!(
            result,
            Err(SeriesError::NonFiniteValue { axis: 1, index: 1 })
        ));
    }

    #[test]
    fn from_rows_transposes() {
        let ts = TimeSeries::from_rows(&[vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]])
            .unwrap();
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.n_axes(), 2);
        assert_eq!(ts.axis(0).unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(ts.axis(1).unwrap(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn from_rows_rejects_uneven_rows() {
        let result = TimeSeries::from_rows(&[vec![1.0, 10.0], vec![2.0]]);
        assert!(matches!(
            result,
            Err(SeriesError::RaggedRow { row: 1, expected: 2, got: 1 })
        ));
    }

    #[test]
    fn try_axis_out_of_range() {
        let ts = TimeSeries::new(vec![vec![1.0, 2.0]]).unwrap();
        assert!(matches!(
            ts.try_axis(3),
            Err(SeriesError::AxisOutOfRange { axis: 3, n_axes: 1 })
        ));
    }

    #[test]
    fn series_id_display_and_order() {
        assert_eq!(format!("{}", SeriesId::new(4)), "4");
        assert!(SeriesId::new(1) < SeriesId::new(2));
    }
}
