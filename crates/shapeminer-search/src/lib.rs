//! Shapelet discovery for labeled multivariate time series.
//!
//! For every label, candidate subsequences anchored at local extrema are
//! pooled per dimension subset and window, reduced by radius clustering, and
//! scored by the information gain of a distance threshold. The best
//! classifier per label is returned as a [`ShapeletModel`].
//!
//! The pipeline has two phases. Precompute fills the extrema and normalized
//! subsequence caches; search then prunes, clusters, computes the BMD table
//! and fits classifiers. Both phases are data-parallel (rayon) and
//! deterministic for a given input.

mod bmd;
mod config;
mod dataset;
mod error;
mod finder;
mod keys;
mod pools;
mod prune;
mod store;
mod windows;

pub use bmd::BmdTable;
pub use config::ShapeletConfig;
pub use dataset::TrainingSet;
pub use error::SearchError;
pub use finder::{SearchOutcome, SearchSummary};
pub use keys::{BmdKey, PoolKey};
pub use pools::ShapeletPools;
pub use prune::{Candidate, CandidatePruner};
pub use shapeminer_classify::{LabelModel, ShapeletModel};
pub use store::{NormalizedStore, estimate_sigma_min};
pub use windows::window_lengths;
