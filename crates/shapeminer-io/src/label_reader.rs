//! CSV label reader.

use std::path::{Path, PathBuf};

use shapeminer_series::Label;
use tracing::{info, instrument};

use crate::IoError;
use crate::domain::{LabelTable, SeriesName};

/// Reads event labels from a CSV file.
///
/// Expected CSV format:
/// - Header row required: `series_id,label`
/// - One row per label occurrence; a series carrying several labels appears
///   on several rows
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row does not have exactly two columns |
/// | [`IoError::EmptySeriesId`] | A row's `series_id` is empty |
/// | [`IoError::EmptyLabel`] | A row's label is empty |
pub struct LabelReader {
    path: PathBuf,
}

impl LabelReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`LabelTable`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<LabelTable, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;
            let id = record.get(0).unwrap_or("");
            if record.len() != 2 {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    series_id: id.to_string(),
                    expected: 2,
                    got: record.len(),
                });
            }
            if id.is_empty() {
                return Err(IoError::EmptySeriesId {
                    path: self.path.clone(),
                    row_index,
                });
            }
            let label = record.get(1).unwrap_or("");
            if label.is_empty() {
                return Err(IoError::EmptyLabel {
                    path: self.path.clone(),
                    row_index,
                });
            }
            rows.push((SeriesName::new(id.to_string()), Label::from(label)));
        }

        if rows.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }
        info!(n_rows = rows.len(), "labels loaded");
        Ok(LabelTable::new(rows))
    }
}
