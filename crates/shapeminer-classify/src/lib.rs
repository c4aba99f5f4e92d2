//! Threshold classifiers over best-matching shapelet distances.
//!
//! Fits the information-gain-maximizing distance threshold for a shapelet,
//! orders classifiers by gain and class margin, predicts unseen series,
//! scores one-vs-rest predictions, and persists the per-label model.

mod classifier;
mod confusion;
mod error;
mod gain;
mod model;
mod serialize;
mod threshold;

pub use classifier::{Classifier, ClassifierBuilder, Prediction};
pub use confusion::BinaryConfusion;
pub use error::ClassifyError;
pub use gain::{InformationGain, entropy};
pub use model::{LabelModel, ShapeletModel};
pub use threshold::{ThresholdFit, fit_threshold};
