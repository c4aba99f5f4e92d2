//! Domain types for shapeminer-io.

use std::fmt;

use shapeminer_series::{Label, TimeSeries};

use crate::IoError;

/// A series identifier as written in the `series_id` column of the input CSV.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesName(String);

impl SeriesName {
    pub(crate) fn new(id: String) -> Self {
        debug_assert!(!id.is_empty(), "series ID must not be empty");
        Self(id)
    }

    /// Return the series ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Multivariate series read from one CSV file.
///
/// Produced by [`SeriesReader`](crate::SeriesReader). `names[i]` identifies
/// `series[i]`; order follows first appearance in the file.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Series identifiers in file order.
    pub names: Vec<SeriesName>,
    /// Axis column names from the header.
    pub axis_names: Vec<String>,
    /// Validated series, all with `axis_names.len()` axes.
    pub series: Vec<TimeSeries>,
}

impl Dataset {
    /// Return the number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Return true if the dataset holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// `(series, label)` pairs read from a label CSV, in file order.
///
/// Produced by [`LabelReader`](crate::LabelReader). A series may appear on
/// several rows, once per label it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    rows: Vec<(SeriesName, Label)>,
}

impl LabelTable {
    pub(crate) fn new(rows: Vec<(SeriesName, Label)>) -> Self {
        Self { rows }
    }

    /// Return the label rows.
    #[must_use]
    pub fn rows(&self) -> &[(SeriesName, Label)] {
        &self.rows
    }

    /// Return the number of label rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Return true if there are no label rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
