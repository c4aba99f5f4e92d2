//! JSON result writer for discovery and evaluation outputs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use shapeminer_classify::{BinaryConfusion, Prediction, ShapeletModel};
use shapeminer_search::SearchSummary;
use shapeminer_series::Label;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::{ExperimentName, SeriesName};

/// Writes discovery and evaluation results to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_shapelets.json` and
/// `{experiment}_evaluate.json`; the model binary goes to
/// `{experiment}_model.bin`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    fn artifact_path(&self, suffix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{suffix}", self.experiment.as_str()))
    }

    fn write_json<T: Serialize>(&self, path: PathBuf, artifact: &T) -> Result<PathBuf, IoError> {
        let json = serde_json::to_string_pretty(artifact).map_err(|e| IoError::EncodeJson {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Write the discovered classifiers and run summary to
    /// `{experiment}_shapelets.json`, returning the path written.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::EncodeJson`] | The artifact cannot be encoded |
    /// | [`IoError::WriteFile`] | The file cannot be written |
    #[instrument(skip_all)]
    pub fn write_shapelets(
        &self,
        model: &ShapeletModel,
        summary: &SearchSummary,
    ) -> Result<PathBuf, IoError> {
        let classifiers = model
            .iter()
            .map(|(label, m)| {
                let c = &m.classifier;
                let n_positive = m.target.iter().filter(|&&t| t).count();
                ClassifierEntry {
                    label,
                    dims: c.dims().axes(),
                    window: c.window(),
                    delta: c.delta(),
                    gain: c.gain().value(),
                    f_c_delta: Some(c.f_c_delta()).filter(|v| v.is_finite()),
                    sigma_min: c.sigma_min(),
                    n_positive,
                    n_negative: m.target.len() - n_positive,
                    shapelet: c.shapelet(),
                }
            })
            .collect();

        let artifact = ShapeletsArtifact {
            experiment: self.experiment.as_str(),
            n_labels: model.len(),
            summary,
            classifiers,
        };
        let path = self.write_json(self.artifact_path("shapelets.json"), &artifact)?;
        info!(path = %path.display(), n_labels = model.len(), "shapelet result written");
        Ok(path)
    }

    /// Write evaluation results to `{experiment}_evaluate.json`, returning
    /// the path written.
    ///
    /// `predictions[i]` holds the per-label predictions of series `names[i]`.
    /// `metrics` is empty when the evaluated series carry no labels.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::EvaluationLengthMismatch`] | `names` and `predictions` differ in length |
    /// | [`IoError::EncodeJson`] | The artifact cannot be encoded |
    /// | [`IoError::WriteFile`] | The file cannot be written |
    #[instrument(skip_all, fields(n_series = names.len()))]
    pub fn write_evaluation(
        &self,
        model: &ShapeletModel,
        names: &[SeriesName],
        predictions: &[BTreeMap<Label, Prediction>],
        metrics: &BTreeMap<Label, BinaryConfusion>,
    ) -> Result<PathBuf, IoError> {
        if names.len() != predictions.len() {
            return Err(IoError::EvaluationLengthMismatch {
                n_series: names.len(),
                n_predictions: predictions.len(),
            });
        }

        let thresholds = model
            .iter()
            .map(|(label, m)| (label, m.classifier.delta()))
            .collect::<BTreeMap<_, _>>();

        let series = names
            .iter()
            .zip(predictions)
            .map(|(name, per_label)| SeriesEntry {
                series_id: name.as_str(),
                results: per_label
                    .iter()
                    .map(|(label, p)| {
                        let delta = thresholds.get(label).copied().unwrap_or(f64::NEG_INFINITY);
                        let entry = MatchEntry {
                            bmd: p.min,
                            best_offset: p.best_offset,
                            matched: p.is_match(delta),
                        };
                        (label, entry)
                    })
                    .collect(),
            })
            .collect();

        let metrics = (!metrics.is_empty()).then(|| {
            metrics
                .iter()
                .map(|(label, cm)| (label, MetricsEntry::from(cm)))
                .collect()
        });

        let artifact = EvaluateArtifact {
            experiment: self.experiment.as_str(),
            n_series: names.len(),
            thresholds,
            series,
            metrics,
        };
        let path = self.write_json(self.artifact_path("evaluate.json"), &artifact)?;
        info!(path = %path.display(), "evaluation result written");
        Ok(path)
    }

    /// Return the path where the model binary should be saved.
    ///
    /// Does not write anything; just computes `{output_dir}/{experiment}_model.bin`.
    #[must_use]
    pub fn model_path(&self) -> PathBuf {
        self.artifact_path("model.bin")
    }
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct ShapeletsArtifact<'a> {
    experiment: &'a str,
    n_labels: usize,
    summary: &'a SearchSummary,
    classifiers: Vec<ClassifierEntry<'a>>,
}

#[derive(Serialize)]
struct ClassifierEntry<'a> {
    label: &'a Label,
    dims: &'a [usize],
    window: usize,
    delta: f64,
    gain: f64,
    /// `None` when one class is empty and the margin is undefined.
    f_c_delta: Option<f64>,
    sigma_min: f64,
    n_positive: usize,
    n_negative: usize,
    shapelet: &'a [Vec<f64>],
}

#[derive(Serialize)]
struct EvaluateArtifact<'a> {
    experiment: &'a str,
    n_series: usize,
    thresholds: BTreeMap<&'a Label, f64>,
    series: Vec<SeriesEntry<'a>>,
    metrics: Option<BTreeMap<&'a Label, MetricsEntry>>,
}

#[derive(Serialize)]
struct SeriesEntry<'a> {
    series_id: &'a str,
    results: BTreeMap<&'a Label, MatchEntry>,
}

#[derive(Serialize)]
struct MatchEntry {
    bmd: f64,
    best_offset: usize,
    matched: bool,
}

#[derive(Serialize)]
struct MetricsEntry {
    true_positives: usize,
    false_positives: usize,
    true_negatives: usize,
    false_negatives: usize,
    support: usize,
    accuracy: f64,
    precision: f64,
    recall: f64,
    f1: f64,
}

impl From<&BinaryConfusion> for MetricsEntry {
    fn from(cm: &BinaryConfusion) -> Self {
        Self {
            true_positives: cm.true_positives,
            false_positives: cm.false_positives,
            true_negatives: cm.true_negatives,
            false_negatives: cm.false_negatives,
            support: cm.support(),
            accuracy: cm.accuracy(),
            precision: cm.precision(),
            recall: cm.recall(),
            f1: cm.f1(),
        }
    }
}
