//! Model persistence via bincode.

use std::collections::BTreeSet;
use std::path::Path;

use shapeminer_series::Label;

use tracing::{debug, info, instrument};

use crate::error::ClassifyError;
use crate::model::ShapeletModel;

/// Current binary format version.
const FORMAT_VERSION: u32 = 2;

/// Versioned envelope for the serialized model.
///
/// `labels` and `windows` index the body so a file can be described without
/// walking every classifier; `load` checks `labels` against the body.
#[derive(serde::Serialize, serde::Deserialize)]
struct ModelEnvelope {
    format_version: u32,
    labels: Vec<Label>,
    windows: BTreeSet<usize>,
    model: ShapeletModel,
}

impl ModelEnvelope {
    fn wrap(model: &ShapeletModel) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            labels: model.labels().cloned().collect(),
            windows: model.iter().map(|(_, m)| m.classifier.window()).collect(),
            model: model.clone(),
        }
    }

    fn labels_match(&self) -> bool {
        self.labels.iter().eq(self.model.labels())
    }
}

impl ShapeletModel {
    /// Save the model to a binary file.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClassifyError::SerializeModel`] | bincode encoding failed |
    /// | [`ClassifyError::WriteModel`] | file write failed |
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ClassifyError> {
        let path = path.as_ref();
        let envelope = ModelEnvelope::wrap(self);

        let bytes = bincode::serialize(&envelope)
            .map_err(|e| ClassifyError::SerializeModel { source: e })?;

        std::fs::write(path, &bytes).map_err(|e| ClassifyError::WriteModel {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(
            size_bytes = bytes.len(),
            n_labels = envelope.labels.len(),
            windows = ?envelope.windows,
            "model saved"
        );
        Ok(())
    }

    /// Load a model from a binary file, rejecting other format versions.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClassifyError::ReadModel`] | file read failed |
    /// | [`ClassifyError::DeserializeModel`] | bincode decoding failed |
    /// | [`ClassifyError::IncompatibleModelVersion`] | format version mismatch |
    /// | [`ClassifyError::ModelLabelMismatch`] | header labels differ from the model's |
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifyError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ClassifyError::ReadModel {
            path: path.to_path_buf(),
            source: e,
        })?;

        let envelope: ModelEnvelope =
            bincode::deserialize(&bytes).map_err(|e| ClassifyError::DeserializeModel {
                path: path.to_path_buf(),
                source: e,
            })?;

        if envelope.format_version != FORMAT_VERSION {
            return Err(ClassifyError::IncompatibleModelVersion {
                expected: FORMAT_VERSION,
                found: envelope.format_version,
                path: path.to_path_buf(),
            });
        }

        if !envelope.labels_match() {
            return Err(ClassifyError::ModelLabelMismatch {
                header: envelope.labels.len(),
                body: envelope.model.len(),
                path: path.to_path_buf(),
            });
        }

        debug!(n_labels = envelope.labels.len(), windows = ?envelope.windows, "model loaded");
        Ok(envelope.model)
    }
}
