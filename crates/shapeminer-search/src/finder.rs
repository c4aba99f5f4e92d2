//! Orchestration: precompute, build pools, score every shapelet, keep the
//! best classifier per label.

use rayon::prelude::*;
use shapeminer_classify::{Classifier, ClassifierBuilder, LabelModel, ShapeletModel};
use shapeminer_cluster::RadiusClustering;
use shapeminer_series::{DimensionSubset, ExtremaIndexer, Label};
use tracing::{debug, info, instrument, warn};

use crate::bmd::BmdTable;
use crate::config::ShapeletConfig;
use crate::dataset::TrainingSet;
use crate::error::SearchError;
use crate::keys::PoolKey;
use crate::pools::ShapeletPools;
use crate::prune::CandidatePruner;
use crate::store::{NormalizedStore, estimate_sigma_min};
use crate::windows::window_lengths;

/// Statistics of one discovery run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SearchSummary {
    /// Noise floor used for every normalization.
    pub sigma_min: f64,
    /// Whether `sigma_min` was estimated rather than configured.
    pub sigma_min_estimated: bool,
    /// Window lengths tried.
    pub windows: Vec<usize>,
    /// Number of dimension subsets tried.
    pub n_dimension_subsets: usize,
    /// Number of extrema keys computed.
    pub n_extrema: usize,
    /// Number of non-empty shapelet pools.
    pub n_pools: usize,
    /// Number of clustered shapelets across pools.
    pub n_shapelets: usize,
    /// Number of best-matching distances computed.
    pub n_distances: usize,
    /// Number of classifiers fitted.
    pub n_classifiers: usize,
    /// Labels for which no candidate existed.
    pub skipped_labels: Vec<Label>,
}

/// A fitted model with the statistics of the run that produced it.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The best classifier per label.
    pub model: ShapeletModel,
    /// Run statistics.
    pub summary: SearchSummary,
}

#[instrument(skip_all, fields(n_series = set.len(), sl_max = config.sl_max, n_max = config.n_max))]
pub(crate) fn search(config: &ShapeletConfig, set: &TrainingSet) -> Result<SearchOutcome, SearchError> {
    config.validate(set)?;
    let windows = window_lengths(config.sl_max, config.n_max);
    info!(?windows, "window lengths");

    let (sigma_min, sigma_min_estimated) = match config.sigma_min {
        Some(s) => (s, false),
        None => (estimate_sigma_min(set, windows[0])?, true),
    };
    let dims = DimensionSubset::power_set(set.n_axes());

    // Precompute phase: every cache is filled before the search reads it.
    let extrema = ExtremaIndexer::new(set.series(), config.w_ext);
    extrema.precompute()?;
    let store = NormalizedStore::build(set, &windows, sigma_min)?;

    // Search phase.
    let clustering = RadiusClustering::new(config.d_max)?;
    let pruner = CandidatePruner::new(set, &extrema, &store);
    let pools = ShapeletPools::build(&pruner, &clustering, &dims, &windows)?;
    let table = BmdTable::compute(&pools, &store, set.len())?;

    let mut model = ShapeletModel::new();
    let mut n_classifiers = 0;
    let mut skipped_labels = Vec::new();
    for label in set.unique_labels() {
        let target = set.target(&label);
        let (best, fitted) =
            best_classifier(&label, &target, &dims, &windows, &pools, &table, sigma_min)?;
        n_classifiers += fitted;
        match best {
            Some(classifier) => {
                info!(
                    label = %label,
                    dims = %classifier.dims(),
                    window = classifier.window(),
                    gain = %classifier.gain(),
                    delta = classifier.delta(),
                    "best classifier"
                );
                model.insert(label, LabelModel { classifier, target });
            }
            None => {
                warn!(label = %label, "no candidate shapelet; label has no classifier");
                skipped_labels.push(label);
            }
        }
    }

    let summary = SearchSummary {
        sigma_min,
        sigma_min_estimated,
        windows,
        n_dimension_subsets: dims.len(),
        n_extrema: extrema.computations(),
        n_pools: pools.len(),
        n_shapelets: pools.n_shapelets(),
        n_distances: table.len(),
        n_classifiers,
        skipped_labels,
    };
    info!(n_labels = model.len(), n_classifiers, "shapelet search finished");
    Ok(SearchOutcome { model, summary })
}

/// Fit a classifier for every pooled shapelet of `label` and keep the best.
///
/// Pools are visited by dimension subset, then window, then pool order. A
/// candidate replaces the incumbent unless the incumbent strictly beats it,
/// so the last of several equally good classifiers is kept.
fn best_classifier(
    label: &Label,
    target: &[bool],
    dims: &[DimensionSubset],
    windows: &[usize],
    pools: &ShapeletPools,
    table: &BmdTable,
    sigma_min: f64,
) -> Result<(Option<Classifier>, usize), SearchError> {
    let mut best: Option<Classifier> = None;
    let mut fitted = 0;
    for d in dims {
        for &w in windows {
            let key = PoolKey::new(label.clone(), d.clone(), w);
            let shapelets = pools.get(&key);
            if shapelets.is_empty() {
                continue;
            }
            let builder = ClassifierBuilder::new(d.clone(), w, sigma_min)?;
            let classifiers = shapelets
                .par_iter()
                .enumerate()
                .map(|(i, shapelet)| -> Result<Classifier, SearchError> {
                    let bmds = table.feature_vector(&key, i).ok_or_else(|| {
                        SearchError::MissingDistances {
                            label: label.clone(),
                            dims: d.clone(),
                            window: w,
                        }
                    })?;
                    Ok(builder.fit(shapelet, &bmds, target)?)
                })
                .collect::<Result<Vec<Classifier>, SearchError>>()?;
            fitted += classifiers.len();
            debug!(label = %label, dims = %d, window = w, n = classifiers.len(), "classifiers fitted");

            for candidate in classifiers {
                if best.as_ref().is_none_or(|incumbent| !incumbent.beats(&candidate)) {
                    best = Some(candidate);
                }
            }
        }
    }
    Ok((best, fitted))
}
