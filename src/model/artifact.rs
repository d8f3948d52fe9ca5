//! Read the serialized model artifact.
//!
//! The artifact is the "portable" representation of the trained classifier:
//! - a versioned, ordered feature schema (column names fixed at training time)
//! - linear-model parameters (family, intercept, per-column weights, threshold)
//! - provenance metadata (tool name, artifact format version)
//!
//! It lives at a fixed relative path and is deserialized exactly once, before
//! any UI renders. A missing or malformed file is fatal.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::ModelSchema;
use crate::error::AppError;

/// Fixed relative path of the model artifact.
pub const MODEL_PATH: &str = "model/loan_model.json";

/// Classifier family.
///
/// `Logistic` scores are calibrated probabilities; `Margin` models only
/// produce a signed decision score, so probability output is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    Logistic,
    Margin,
}

impl ModelFamily {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelFamily::Logistic => "logistic",
            ModelFamily::Margin => "margin",
        }
    }
}

/// Linear classifier parameters.
///
/// `weights` is parallel to the artifact schema's `columns`: weight `i`
/// multiplies column `i` of the aligned feature row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub family: ModelFamily,
    pub intercept: f64,
    pub weights: Vec<f64>,
    /// Decision cut-off: probability for `logistic`, raw score for `margin`.
    pub threshold: f64,
}

/// A deserialized model artifact file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub tool: String,
    pub version: u32,
    pub schema: ModelSchema,
    pub model: LinearModel,
}

/// Load the model artifact from disk.
///
/// Rejects artifacts whose weight count disagrees with the schema length, so
/// a bad export fails at startup instead of at the first prediction.
pub fn load_artifact(path: &Path) -> Result<ModelArtifact, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open model artifact '{}': {e}", path.display()),
        )
    })?;

    let artifact: ModelArtifact = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid model artifact: {e}")))?;

    if artifact.model.weights.len() != artifact.schema.len() {
        return Err(AppError::new(
            2,
            format!(
                "Model artifact is inconsistent: {} weights for {} schema columns.",
                artifact.model.weights.len(),
                artifact.schema.len()
            ),
        ));
    }

    Ok(artifact)
}
