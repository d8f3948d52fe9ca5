//! Inference over an aligned feature row.
//!
//! The predictor relies on two primitive operations:
//! - compute the raw decision score (weights · features + intercept)
//! - map the score to a label, and to a probability when the family has one
//!
//! Both are pure functions of the loaded model parameters; nothing here
//! mutates the artifact.

use nalgebra::DVector;

use crate::error::AppError;
use crate::features::FeatureRow;
use crate::model::artifact::{LinearModel, ModelFamily};

/// Raw decision score for an aligned feature row.
///
/// Fails on shape mismatch (the row must already be aligned to the artifact
/// schema) and on non-finite output.
pub fn decision_score(model: &LinearModel, features: &FeatureRow) -> Result<f64, AppError> {
    if features.len() != model.weights.len() {
        return Err(AppError::new(
            4,
            format!(
                "Feature row has {} columns but the model expects {}.",
                features.len(),
                model.weights.len()
            ),
        ));
    }

    let x = DVector::from_column_slice(features.values());
    let w = DVector::from_column_slice(&model.weights);
    let score = w.dot(&x) + model.intercept;

    if !score.is_finite() {
        return Err(AppError::new(4, "Non-finite model score during inference."));
    }

    Ok(score)
}

/// Predict the binary label (1 = approved, 0 = not approved).
pub fn predict(model: &LinearModel, features: &FeatureRow) -> Result<u8, AppError> {
    let score = decision_score(model, features)?;
    let approved = match model.family {
        ModelFamily::Logistic => sigmoid(score) >= model.threshold,
        ModelFamily::Margin => score >= model.threshold,
    };
    Ok(u8::from(approved))
}

/// Positive-class probability, when the model family provides one.
///
/// A `Margin` model has no probability interface; that is `Ok(None)`, not an
/// error.
pub fn predict_probability(
    model: &LinearModel,
    features: &FeatureRow,
) -> Result<Option<f64>, AppError> {
    match model.family {
        ModelFamily::Logistic => {
            let score = decision_score(model, features)?;
            Ok(Some(sigmoid(score)))
        }
        ModelFamily::Margin => Ok(None),
    }
}

fn sigmoid(score: f64) -> f64 {
    1.0 / (1.0 + (-score).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[f64]) -> FeatureRow {
        let mut out = FeatureRow::new();
        for (i, v) in values.iter().enumerate() {
            out.push(format!("c{i}"), *v);
        }
        out
    }

    fn logistic(weights: Vec<f64>, intercept: f64) -> LinearModel {
        LinearModel {
            family: ModelFamily::Logistic,
            intercept,
            weights,
            threshold: 0.5,
        }
    }

    #[test]
    fn logistic_scores_match_hand_computation() {
        let model = logistic(vec![1.0, -2.0], 0.5);
        let features = row(&[2.0, 1.0]);

        // score = 1*2 - 2*1 + 0.5 = 0.5
        let score = decision_score(&model, &features).unwrap();
        assert!((score - 0.5).abs() < 1e-12);

        let p = predict_probability(&model, &features).unwrap().unwrap();
        assert!((p - 1.0 / (1.0 + (-0.5f64).exp())).abs() < 1e-12);
        assert_eq!(predict(&model, &features).unwrap(), 1);
    }

    #[test]
    fn logistic_rejects_below_threshold() {
        let model = logistic(vec![1.0], 0.0);
        let features = row(&[-3.0]);
        assert_eq!(predict(&model, &features).unwrap(), 0);
    }

    #[test]
    fn margin_model_has_no_probability() {
        let model = LinearModel {
            family: ModelFamily::Margin,
            intercept: 0.0,
            weights: vec![1.0],
            threshold: 0.0,
        };
        let features = row(&[2.0]);

        assert_eq!(predict(&model, &features).unwrap(), 1);
        assert_eq!(predict_probability(&model, &features).unwrap(), None);
    }

    #[test]
    fn shape_mismatch_is_an_inference_error() {
        let model = logistic(vec![1.0, 2.0], 0.0);
        let features = row(&[1.0]);
        let err = predict(&model, &features).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("expects 2"));
    }

    #[test]
    fn probability_stays_in_unit_interval() {
        let model = logistic(vec![100.0], 0.0);
        for x in [-10.0, -1.0, 0.0, 1.0, 10.0] {
            let p = predict_probability(&model, &row(&[x])).unwrap().unwrap();
            assert!((0.0..=1.0).contains(&p), "p={p} out of range for x={x}");
        }
    }
}
