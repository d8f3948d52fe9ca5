//! Feature assembly: raw applicant record -> model-ready feature row.
//!
//! This module is responsible for turning an `ApplicantRecord` into a row of
//! named numeric columns that matches the classifier's training schema.
//!
//! Design goals:
//! - **Explicit one-hot universe**: every categorical field always emits its
//!   full indicator set, so the pre-alignment column set is the same for
//!   every applicant.
//! - **Deterministic alignment**: `align_to_schema` guarantees the output
//!   column set and order equal the artifact schema exactly.
//! - **Separation of concerns**: no model math here.

use std::collections::HashMap;

use crate::domain::{
    ApplicantRecord, HomeOwnership, LoanGrade, LoanIntent, ModelSchema,
};
use crate::error::AppError;

/// An ordered set of named feature columns.
///
/// Column order is insertion order until `align_to_schema` reorders the row
/// to the artifact schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: f64) {
        self.columns.push(column.into());
        self.values.push(value);
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Build the pre-alignment feature row for one applicant.
    ///
    /// Numeric columns come first (including the binarized default flag and
    /// the derived debt-to-income ratio), followed by the full one-hot
    /// indicator universe for each categorical field. Indicator column names
    /// are `<field>_<LABEL>`, matching the training-time encoding.
    pub fn from_record(record: &ApplicantRecord) -> Self {
        let mut row = FeatureRow::new();

        row.push("person_age", record.age as f64);
        row.push("person_income", record.income as f64);
        row.push("person_emp_length", record.emp_length as f64);
        row.push("loan_amnt", record.loan_amnt as f64);
        row.push("loan_int_rate", record.int_rate);
        row.push("loan_percent_income", record.percent_income);
        row.push("cb_person_cred_hist_length", record.cred_hist_length as f64);
        row.push(
            "cb_person_default_on_file",
            record.default_on_file.as_feature(),
        );
        row.push("debt_to_income_ratio", record.debt_to_income_ratio());

        for v in HomeOwnership::ALL {
            row.push(
                format!("person_home_ownership_{}", v.as_str()),
                indicator(v == record.home_ownership),
            );
        }
        for v in LoanIntent::ALL {
            row.push(
                format!("loan_intent_{}", v.as_str()),
                indicator(v == record.loan_intent),
            );
        }
        for v in LoanGrade::ALL {
            row.push(
                format!("loan_grade_{}", v.as_str()),
                indicator(v == record.loan_grade),
            );
        }

        row
    }
}

fn indicator(selected: bool) -> f64 {
    if selected { 1.0 } else { 0.0 }
}

/// Reconcile a feature row against the artifact schema.
///
/// Every schema column missing from the row is inserted with value 0, and the
/// row is restricted and reordered to exactly the schema's column order.
/// Columns not named by the schema are dropped.
///
/// Guarantee: the output column set and order equal the schema exactly,
/// regardless of which categorical values were selected.
pub fn align_to_schema(row: &FeatureRow, schema: &ModelSchema) -> Result<FeatureRow, AppError> {
    if schema.is_empty() {
        return Err(AppError::new(
            2,
            "Model artifact exposes no feature schema; cannot align input columns.",
        ));
    }

    let lookup: HashMap<&str, f64> = row
        .columns
        .iter()
        .map(String::as_str)
        .zip(row.values.iter().copied())
        .collect();

    let mut aligned = FeatureRow::new();
    for column in &schema.columns {
        aligned.push(column.clone(), lookup.get(column.as_str()).copied().unwrap_or(0.0));
    }

    Ok(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DefaultFlag;

    fn sample_record() -> ApplicantRecord {
        ApplicantRecord {
            age: 30,
            income: 50_000,
            emp_length: 5,
            home_ownership: HomeOwnership::Rent,
            default_on_file: DefaultFlag::No,
            cred_hist_length: 10,
            loan_intent: LoanIntent::Education,
            loan_grade: LoanGrade::B,
            loan_amnt: 10_000,
            int_rate: 12.5,
            percent_income: 0.2,
        }
    }

    #[test]
    fn from_record_emits_full_indicator_universe() {
        let row = FeatureRow::from_record(&sample_record());

        // 9 numeric + 4 + 6 + 7 indicators.
        assert_eq!(row.len(), 26);

        assert_eq!(row.get("person_home_ownership_RENT"), Some(1.0));
        assert_eq!(row.get("person_home_ownership_OWN"), Some(0.0));
        assert_eq!(row.get("person_home_ownership_MORTGAGE"), Some(0.0));
        assert_eq!(row.get("person_home_ownership_OTHER"), Some(0.0));

        assert_eq!(row.get("loan_intent_EDUCATION"), Some(1.0));
        for intent in LoanIntent::ALL {
            if intent != LoanIntent::Education {
                assert_eq!(row.get(&format!("loan_intent_{}", intent.as_str())), Some(0.0));
            }
        }

        assert_eq!(row.get("loan_grade_B"), Some(1.0));
        for grade in LoanGrade::ALL {
            if grade != LoanGrade::B {
                assert_eq!(row.get(&format!("loan_grade_{}", grade.as_str())), Some(0.0));
            }
        }
    }

    #[test]
    fn from_record_derives_ratio_and_flag() {
        let row = FeatureRow::from_record(&sample_record());
        assert_eq!(row.get("cb_person_default_on_file"), Some(0.0));
        assert!((row.get("debt_to_income_ratio").unwrap() - 0.2).abs() < 1e-12);

        let mut record = sample_record();
        record.default_on_file = DefaultFlag::Yes;
        record.income = 0;
        let row = FeatureRow::from_record(&record);
        assert_eq!(row.get("cb_person_default_on_file"), Some(1.0));
        assert_eq!(row.get("debt_to_income_ratio"), Some(10_000.0));
    }

    #[test]
    fn align_matches_schema_order_and_membership() {
        let row = FeatureRow::from_record(&sample_record());
        let schema = ModelSchema {
            version: 1,
            columns: vec![
                "loan_grade_B".to_string(),
                "person_age".to_string(),
                "debt_to_income_ratio".to_string(),
                "a_column_the_encoder_never_emits".to_string(),
            ],
        };

        let aligned = align_to_schema(&row, &schema).unwrap();
        assert_eq!(aligned.columns(), schema.columns.as_slice());
        assert_eq!(aligned.values(), &[1.0, 30.0, 0.2, 0.0]);
    }

    #[test]
    fn align_is_schema_exact_for_any_categorical_selection() {
        let schema = ModelSchema {
            version: 1,
            columns: FeatureRow::from_record(&sample_record())
                .columns()
                .to_vec(),
        };

        for home in HomeOwnership::ALL {
            for grade in LoanGrade::ALL {
                let mut record = sample_record();
                record.home_ownership = home;
                record.loan_grade = grade;
                let aligned =
                    align_to_schema(&FeatureRow::from_record(&record), &schema).unwrap();
                assert_eq!(aligned.columns(), schema.columns.as_slice());
            }
        }
    }

    #[test]
    fn align_rejects_empty_schema() {
        let row = FeatureRow::from_record(&sample_record());
        let schema = ModelSchema {
            version: 1,
            columns: Vec::new(),
        };
        let err = align_to_schema(&row, &schema).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
