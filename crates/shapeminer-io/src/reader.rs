//! Long-format CSV series reader with full input validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use shapeminer_series::TimeSeries;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::{Dataset, SeriesName};

/// Reads multivariate time series from a long-format CSV file.
///
/// Expected CSV format:
/// - Header row required: `series_id,<axis_0>,...,<axis_k>`
/// - One row per time step; the rows of one series are contiguous and in
///   time order
/// - Every row has the same number of columns as the header
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::NoAxisColumns`] | Header has only the `series_id` column |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::EmptySeriesId`] | A row's `series_id` is empty |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, or unparseable float |
/// | [`IoError::NonContiguousSeries`] | A series resumes after another one started |
pub struct SeriesReader {
    path: PathBuf,
}

/// Rows of the series currently being read.
struct Block {
    name: String,
    rows: Vec<Vec<f64>>,
}

impl SeriesReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }

    fn finish(&self, block: Block, dataset: &mut Dataset) -> Result<(), IoError> {
        let ts = TimeSeries::from_rows(&block.rows).map_err(|e| IoError::InvalidSeries {
            path: self.path.clone(),
            series_id: block.name.clone(),
            source: e,
        })?;
        debug!(series = %block.name, len = ts.len(), "series read");
        dataset.names.push(SeriesName::new(block.name));
        dataset.series.push(ts);
        Ok(())
    }

    /// Read and validate the CSV file, returning a [`Dataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Dataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so that short rows hit InconsistentRowLength rather
        // than a low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?;
        let expected_cols = header.len();
        if expected_cols < 2 {
            return Err(IoError::NoAxisColumns {
                path: self.path.clone(),
            });
        }
        let axis_names: Vec<String> = header.iter().skip(1).map(String::from).collect();
        debug!(n_axes = axis_names.len(), "read CSV header");

        let mut dataset = Dataset {
            names: Vec::new(),
            axis_names,
            series: Vec::new(),
        };
        let mut started: HashMap<String, usize> = HashMap::new();
        let mut current: Option<Block> = None;

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;
            let id = record.get(0).unwrap_or("");

            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    series_id: id.to_string(),
                    expected: expected_cols,
                    got: record.len(),
                });
            }
            if id.is_empty() {
                return Err(IoError::EmptySeriesId {
                    path: self.path.clone(),
                    row_index,
                });
            }

            let mut row = Vec::with_capacity(expected_cols - 1);
            for col_index in 1..record.len() {
                let raw = record.get(col_index).unwrap_or("");
                let non_finite = || IoError::NonFiniteValue {
                    path: self.path.clone(),
                    row_index,
                    col_index: col_index - 1,
                    raw: raw.to_string(),
                };
                let value: f64 = raw.trim().parse().map_err(|_| non_finite())?;
                if !value.is_finite() {
                    return Err(non_finite());
                }
                row.push(value);
            }

            if let Some(block) = current.as_mut().filter(|b| b.name == id) {
                block.rows.push(row);
                continue;
            }
            if let Some(&first_row) = started.get(id) {
                return Err(IoError::NonContiguousSeries {
                    path: self.path.clone(),
                    series_id: id.to_string(),
                    first_row,
                    row_index,
                });
            }
            started.insert(id.to_string(), row_index);
            let next = Block {
                name: id.to_string(),
                rows: vec![row],
            };
            if let Some(done) = current.replace(next) {
                self.finish(done, &mut dataset)?;
            }
        }

        match current {
            Some(block) => self.finish(block, &mut dataset)?,
            None => {
                return Err(IoError::EmptyDataset {
                    path: self.path.clone(),
                });
            }
        }

        info!(
            n_series = dataset.len(),
            n_axes = dataset.axis_names.len(),
            min_len = dataset.series.iter().map(TimeSeries::len).min().unwrap_or(0),
            "dataset loaded"
        );
        Ok(dataset)
    }
}
