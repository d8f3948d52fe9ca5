//! Shared "screen pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! record -> advisory checks -> feature derivation -> schema alignment -> predict
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{ApplicantRecord, PredictionResult};
use crate::error::AppError;
use crate::features::{align_to_schema, FeatureRow};
use crate::model::{predict, predict_probability, ModelArtifact};
use crate::validate::{advisory_warnings, Advisory};

/// All computed outputs of a single screening request.
#[derive(Debug, Clone)]
pub struct ScreenOutput {
    pub record: ApplicantRecord,
    /// The aligned feature row actually fed to the classifier.
    pub features: FeatureRow,
    pub result: PredictionResult,
    pub warnings: Vec<Advisory>,
}

/// Execute the full screening pipeline for one applicant.
///
/// Stateless request/response: the artifact is only read, and everything
/// produced here is discarded after rendering.
pub fn run_screen(
    artifact: &ModelArtifact,
    record: &ApplicantRecord,
) -> Result<ScreenOutput, AppError> {
    let warnings = advisory_warnings(record);

    let pre = FeatureRow::from_record(record);
    let features = align_to_schema(&pre, &artifact.schema)?;

    let label = predict(&artifact.model, &features)?;
    let probability = predict_probability(&artifact.model, &features)?;

    Ok(ScreenOutput {
        record: record.clone(),
        features,
        result: PredictionResult { label, probability },
        warnings,
    })
}
