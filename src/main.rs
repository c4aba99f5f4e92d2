use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use shapeminer_classify::{BinaryConfusion, ShapeletModel};
use shapeminer_io::{
    ExperimentName, LabelReader, ResultWriter, SeriesReader, align, attach_labels,
};
use shapeminer_search::ShapeletConfig;
use shapeminer_series::Label;

#[derive(Parser)]
#[command(name = "shapeminer")]
#[command(about = "Shapelet discovery and threshold classification for multivariate time series")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Search parameters for shapelet discovery.
#[derive(Args, Debug, Clone)]
struct SearchArgs {
    /// Maximum shapelet length in samples
    #[arg(long)]
    sl_max: usize,

    /// Clustering radius for merging similar candidates
    #[arg(long, default_value_t = 0.6)]
    d_max: f64,

    /// Number of shapelet lengths tried, evenly spaced up to sl_max
    #[arg(long, default_value_t = 3)]
    n_max: usize,

    /// Minimum separation between local extrema
    #[arg(long, default_value_t = 25)]
    w_ext: usize,

    /// Noise floor for z-normalization (estimated from unlabeled series if unset)
    #[arg(long)]
    sigma_min: Option<f64>,
}

impl SearchArgs {
    fn config(&self) -> Result<ShapeletConfig> {
        Ok(ShapeletConfig::new(self.sl_max)?
            .with_d_max(self.d_max)
            .with_n_max(self.n_max)
            .with_w_ext(self.w_ext)
            .with_sigma_min(self.sigma_min))
    }
}

#[derive(Subcommand)]
enum Command {
    /// Discover one shapelet classifier per label and save the model
    Find {
        /// Path to the long-format series CSV (series_id,<axis_0>,...)
        #[arg(long)]
        data: PathBuf,

        /// Path to the label CSV (series_id,label)
        #[arg(long)]
        labels: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Score series against a saved model
    Evaluate {
        /// Path to the trained model binary
        #[arg(long)]
        model: PathBuf,

        /// Path to the long-format series CSV
        #[arg(long)]
        data: PathBuf,

        /// Optional label CSV; enables per-label confusion metrics
        #[arg(long)]
        labels: Option<PathBuf>,

        /// Experiment name for output files
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct FindOutput {
    experiment: String,
    n_series: usize,
    n_unlabeled: usize,
    sigma_min: f64,
    windows: Vec<usize>,
    classifiers: Vec<ClassifierOutput>,
    skipped_labels: Vec<Label>,
    model_path: PathBuf,
}

#[derive(Serialize)]
struct ClassifierOutput {
    label: Label,
    dims: String,
    window: usize,
    delta: f64,
    gain: f64,
}

#[derive(Serialize)]
struct EvaluateOutput {
    experiment: String,
    n_series: usize,
    matches: BTreeMap<Label, usize>,
    accuracy: Option<BTreeMap<Label, f64>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Find {
            data,
            labels,
            experiment,
            output_dir,
            search,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;
            let config = search.config().context("invalid search configuration")?;

            // 1. Read series and labels, attach label sets
            let dataset = SeriesReader::new(&data)
                .read()
                .context("failed to read series CSV")?;
            let table = LabelReader::new(&labels)
                .read()
                .context("failed to read label CSV")?;
            let aligned = align(dataset, &table).context("failed to attach labels to series")?;
            let n_unlabeled = aligned.n_unlabeled();
            let (_, set) = aligned
                .into_training_set()
                .context("invalid training set")?;

            // 2. Search
            let outcome = config
                .fit_with_summary(&set)
                .context("shapelet search failed")?;

            // 3. Persist model and JSON artifact
            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let model_path = writer.model_path();
            outcome
                .model
                .save(&model_path)
                .context("failed to save model")?;
            info!(path = %model_path.display(), "model saved");
            writer.write_shapelets(&outcome.model, &outcome.summary)?;

            // 4. Print summary
            let output = FindOutput {
                experiment,
                n_series: set.len(),
                n_unlabeled,
                sigma_min: outcome.summary.sigma_min,
                windows: outcome.summary.windows.clone(),
                classifiers: outcome
                    .model
                    .iter()
                    .map(|(label, m)| ClassifierOutput {
                        label: label.clone(),
                        dims: m.classifier.dims().to_string(),
                        window: m.classifier.window(),
                        delta: m.classifier.delta(),
                        gain: m.classifier.gain().value(),
                    })
                    .collect(),
                skipped_labels: outcome.summary.skipped_labels,
                model_path,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Evaluate {
            model,
            data,
            labels,
            experiment,
            output_dir,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;

            // 1. Load model and series
            let model = ShapeletModel::load(&model).context("failed to load model")?;
            info!(n_labels = model.len(), "model loaded");
            let dataset = SeriesReader::new(&data)
                .read()
                .context("failed to read series CSV")?;

            // 2. Optional labels, one set per series; all-background sets are allowed
            let (names, series, label_sets) = match labels {
                Some(path) => {
                    let table = LabelReader::new(&path)
                        .read()
                        .context("failed to read label CSV")?;
                    let (names, series, sets) = attach_labels(dataset, &table).into_parts();
                    (names, series, Some(sets))
                }
                None => (dataset.names, dataset.series, None),
            };

            // 3. Predict every series against every label
            let predictions = series
                .par_iter()
                .map(|s| model.predict(s))
                .collect::<Result<Vec<_>, _>>()
                .context("prediction failed")?;

            let mut matches = BTreeMap::new();
            let mut metrics = BTreeMap::new();
            for (label, m) in model.iter() {
                let predicted: Vec<bool> = predictions
                    .iter()
                    .map(|p| p.get(label).is_some_and(|p| p.is_match(m.classifier.delta())))
                    .collect();
                matches.insert(label.clone(), predicted.iter().filter(|&&p| p).count());
                if let Some(sets) = &label_sets {
                    let target: Vec<bool> = sets.iter().map(|s| s.contains(label)).collect();
                    let cm = BinaryConfusion::from_predictions(&target, &predicted)?;
                    info!(%label, accuracy = cm.accuracy(), f1 = cm.f1(), "label evaluated");
                    metrics.insert(label.clone(), cm);
                }
            }

            // 4. Write evaluation JSON
            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            writer.write_evaluation(&model, &names, &predictions, &metrics)?;

            // 5. Print summary
            let output = EvaluateOutput {
                experiment,
                n_series: names.len(),
                matches,
                accuracy: label_sets.is_some().then(|| {
                    metrics
                        .iter()
                        .map(|(label, cm)| (label.clone(), cm.accuracy()))
                        .collect()
                }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
