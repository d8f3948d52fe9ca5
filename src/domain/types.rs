//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - filled in from the TUI form or `predict` flags
//! - turned into a feature row for the classifier
//! - echoed back in diagnostic output

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Form/widget bounds for the applicant fields.
///
/// These are UI hints, not hard constraints: the collector accepts values
/// outside these ranges and lets the advisory checks comment on them.
pub const AGE_MIN: u32 = 18;
pub const AGE_MAX: u32 = 75;
pub const INCOME_MIN: u64 = 10_000;
pub const EMP_LENGTH_MAX: u32 = 50;
pub const LOAN_AMNT_MIN: u64 = 5_000;
pub const INT_RATE_MIN: f64 = 5.0;
pub const INT_RATE_MAX: f64 = 25.0;

/// Home-ownership status, as labeled in the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum HomeOwnership {
    #[value(name = "OWN")]
    Own,
    #[value(name = "RENT")]
    Rent,
    #[value(name = "MORTGAGE")]
    Mortgage,
    #[value(name = "OTHER")]
    Other,
}

impl HomeOwnership {
    pub const ALL: [HomeOwnership; 4] = [
        HomeOwnership::Own,
        HomeOwnership::Rent,
        HomeOwnership::Mortgage,
        HomeOwnership::Other,
    ];

    /// Training-data label; also the one-hot column-name suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            HomeOwnership::Own => "OWN",
            HomeOwnership::Rent => "RENT",
            HomeOwnership::Mortgage => "MORTGAGE",
            HomeOwnership::Other => "OTHER",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

impl std::fmt::Display for HomeOwnership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the credit bureau has a default on file for the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum DefaultFlag {
    #[value(name = "Y")]
    #[serde(rename = "Y")]
    Yes,
    #[value(name = "N")]
    #[serde(rename = "N")]
    No,
}

impl DefaultFlag {
    pub const ALL: [DefaultFlag; 2] = [DefaultFlag::Yes, DefaultFlag::No];

    pub fn as_str(self) -> &'static str {
        match self {
            DefaultFlag::Yes => "Y",
            DefaultFlag::No => "N",
        }
    }

    /// Binarized value fed to the model (Y→1, N→0).
    pub fn as_feature(self) -> f64 {
        match self {
            DefaultFlag::Yes => 1.0,
            DefaultFlag::No => 0.0,
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

impl std::fmt::Display for DefaultFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stated purpose of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanIntent {
    #[value(name = "EDUCATION")]
    Education,
    #[value(name = "MEDICAL")]
    Medical,
    #[value(name = "VENTURE")]
    Venture,
    #[value(name = "PERSONAL")]
    Personal,
    #[value(name = "HOMEIMPROVEMENT")]
    HomeImprovement,
    #[value(name = "DEBTCONSOLIDATION")]
    DebtConsolidation,
}

impl LoanIntent {
    pub const ALL: [LoanIntent; 6] = [
        LoanIntent::Education,
        LoanIntent::Medical,
        LoanIntent::Venture,
        LoanIntent::Personal,
        LoanIntent::HomeImprovement,
        LoanIntent::DebtConsolidation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LoanIntent::Education => "EDUCATION",
            LoanIntent::Medical => "MEDICAL",
            LoanIntent::Venture => "VENTURE",
            LoanIntent::Personal => "PERSONAL",
            LoanIntent::HomeImprovement => "HOMEIMPROVEMENT",
            LoanIntent::DebtConsolidation => "DEBTCONSOLIDATION",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

impl std::fmt::Display for LoanIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal risk grade assigned to the loan (A = best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanGrade {
    #[value(name = "A")]
    A,
    #[value(name = "B")]
    B,
    #[value(name = "C")]
    C,
    #[value(name = "D")]
    D,
    #[value(name = "E")]
    E,
    #[value(name = "F")]
    F,
    #[value(name = "G")]
    G,
}

impl LoanGrade {
    pub const ALL: [LoanGrade; 7] = [
        LoanGrade::A,
        LoanGrade::B,
        LoanGrade::C,
        LoanGrade::D,
        LoanGrade::E,
        LoanGrade::F,
        LoanGrade::G,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LoanGrade::A => "A",
            LoanGrade::B => "B",
            LoanGrade::C => "C",
            LoanGrade::D => "D",
            LoanGrade::E => "E",
            LoanGrade::F => "F",
            LoanGrade::G => "G",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

impl std::fmt::Display for LoanGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step through an enum's `ALL` array with wraparound.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: i32) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let len = all.len() as i32;
    let next = (idx as i32 + delta).rem_euclid(len);
    all[next as usize]
}

/// One applicant's raw inputs, one instance per prediction request.
///
/// Nothing here is validated beyond its type: out-of-range values flow
/// through unchanged and only trigger advisory warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub age: u32,
    pub income: u64,
    pub emp_length: u32,
    pub home_ownership: HomeOwnership,
    pub default_on_file: DefaultFlag,
    pub cred_hist_length: u32,
    pub loan_intent: LoanIntent,
    pub loan_grade: LoanGrade,
    pub loan_amnt: u64,
    pub int_rate: f64,
    pub percent_income: f64,
}

impl ApplicantRecord {
    /// Loan amount over income, with the denominator floored at 1 so that a
    /// zero income never divides by zero.
    pub fn debt_to_income_ratio(&self) -> f64 {
        self.loan_amnt as f64 / self.income.max(1) as f64
    }
}

impl Default for ApplicantRecord {
    /// The form's initial values (matching the original intake form defaults).
    fn default() -> Self {
        Self {
            age: 30,
            income: 50_000,
            emp_length: 5,
            home_ownership: HomeOwnership::Own,
            default_on_file: DefaultFlag::Yes,
            cred_hist_length: 10,
            loan_intent: LoanIntent::Education,
            loan_grade: LoanGrade::A,
            loan_amnt: 10_000,
            int_rate: 12.5,
            percent_income: 0.2,
        }
    }
}

/// The ordered feature columns the classifier was trained on.
///
/// Persisted inside the model artifact as an explicit, versioned descriptor
/// so the assembler never has to introspect the model at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSchema {
    pub version: u32,
    pub columns: Vec<String>,
}

impl ModelSchema {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Classifier output for one applicant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Binary label: 1 = approved, 0 = not approved.
    pub label: u8,
    /// Positive-class probability, when the model family provides one.
    pub probability: Option<f64>,
}

impl PredictionResult {
    pub fn approved(&self) -> bool {
        self.label == 1
    }
}
