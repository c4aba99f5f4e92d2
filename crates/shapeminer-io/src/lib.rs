//! File I/O, validation, and serialization for the shapeminer pipeline.

mod align;
mod domain;
mod error;
mod label_reader;
mod reader;
mod writer;

pub use align::{LabeledDataset, align, attach_labels};
pub use domain::{Dataset, ExperimentName, LabelTable, SeriesName};
pub use error::IoError;
pub use label_reader::LabelReader;
pub use reader::SeriesReader;
pub use writer::ResultWriter;
