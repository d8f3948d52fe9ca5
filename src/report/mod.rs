//! Formatted terminal output for screening results.
//!
//! We keep formatting code in one place so:
//! - the assembly/inference code stays clean and testable
//! - output changes are localized (the TUI and `predict` share these strings)

use crate::app::pipeline::ScreenOutput;
use crate::domain::{ModelSchema, PredictionResult};
use crate::features::FeatureRow;

/// Decision line for the result panel.
pub fn format_decision(result: &PredictionResult) -> &'static str {
    if result.approved() {
        "Loan approved."
    } else {
        "Loan not approved."
    }
}

/// Probability line, two-decimal percentage.
///
/// Returns `None` when the model family has no probability interface; the
/// caller omits the line entirely.
pub fn format_probability(result: &PredictionResult) -> Option<String> {
    result
        .probability
        .map(|p| format!("Approval probability: {:.2}%", p * 100.0))
}

/// Full text output for the `predict` subcommand.
pub fn format_screen_output(output: &ScreenOutput, show_features: bool) -> String {
    let mut out = String::new();

    for warning in &output.warnings {
        out.push_str(&format!("warning: {}\n", warning.message));
    }
    if !output.warnings.is_empty() {
        out.push('\n');
    }

    out.push_str(format_decision(&output.result));
    out.push('\n');

    if let Some(line) = format_probability(&output.result) {
        out.push_str(&line);
        out.push('\n');
    }

    if show_features {
        out.push('\n');
        out.push_str(&format_features(&output.features));
    }

    out
}

/// Aligned feature-vector dump (diagnostic output).
pub fn format_features(features: &FeatureRow) -> String {
    let width = features
        .columns()
        .iter()
        .map(|c| c.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (column, value) in features.columns().iter().zip(features.values()) {
        out.push_str(&format!("{column:<width$}  {value}\n"));
    }
    out
}

/// Ordered schema listing for the `schema` subcommand.
pub fn format_schema(schema: &ModelSchema) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Feature schema v{} ({} columns):\n",
        schema.version,
        schema.len()
    ));
    for (i, column) in schema.columns.iter().enumerate() {
        out.push_str(&format!("{:>3}  {column}\n", i + 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApplicantRecord;
    use crate::validate::Advisory;

    #[test]
    fn decision_lines() {
        let approved = PredictionResult {
            label: 1,
            probability: None,
        };
        let rejected = PredictionResult {
            label: 0,
            probability: None,
        };
        assert_eq!(format_decision(&approved), "Loan approved.");
        assert_eq!(format_decision(&rejected), "Loan not approved.");
    }

    #[test]
    fn probability_renders_two_decimals_or_not_at_all() {
        let with = PredictionResult {
            label: 1,
            probability: Some(0.62501),
        };
        assert_eq!(
            format_probability(&with).unwrap(),
            "Approval probability: 62.50%"
        );

        let without = PredictionResult {
            label: 1,
            probability: None,
        };
        assert_eq!(format_probability(&without), None);
    }

    #[test]
    fn screen_output_includes_warnings_and_omits_missing_probability() {
        let mut features = FeatureRow::new();
        features.push("person_age", 30.0);

        let output = ScreenOutput {
            record: ApplicantRecord::default(),
            features,
            result: PredictionResult {
                label: 0,
                probability: None,
            },
            warnings: vec![Advisory {
                field: "income",
                message: "Income should be at least 10000.".to_string(),
            }],
        };

        let text = format_screen_output(&output, false);
        assert!(text.contains("warning: Income should be at least 10000."));
        assert!(text.contains("Loan not approved."));
        assert!(!text.contains("Approval probability"));
    }

    #[test]
    fn schema_listing_is_ordered() {
        let schema = ModelSchema {
            version: 1,
            columns: vec!["person_age".to_string(), "loan_amnt".to_string()],
        };
        let text = format_schema(&schema);
        assert!(text.starts_with("Feature schema v1 (2 columns):"));
        let age_pos = text.find("person_age").unwrap();
        let amnt_pos = text.find("loan_amnt").unwrap();
        assert!(age_pos < amnt_pos);
    }
}
