//! Command-line parsing for the loan screener.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the assembly/inference code.

use clap::{Parser, Subcommand};

use crate::domain::{DefaultFlag, HomeOwnership, LoanGrade, LoanIntent};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "loan", version, about = "Loan approval screener (pretrained classifier)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one applicant from flags and print the decision.
    Predict(ApplicantArgs),
    /// Print the loaded artifact's ordered feature schema.
    Schema,
    /// Launch the interactive form.
    ///
    /// This uses the same screening pipeline as `loan predict`, but collects
    /// the applicant fields in a terminal UI using Ratatui.
    Tui,
}

/// Applicant fields for one-shot scoring.
///
/// Defaults match the interactive form's initial values. The stated ranges
/// are advisory: out-of-range values are accepted and produce warnings.
#[derive(Debug, Parser, Clone)]
pub struct ApplicantArgs {
    /// Applicant age in years (form range 18-75).
    #[arg(long, default_value_t = 30)]
    pub age: u32,

    /// Annual income (advised at least 10000).
    #[arg(long, default_value_t = 50_000)]
    pub income: u64,

    /// Employment length in years (form range 0-50).
    #[arg(long, default_value_t = 5)]
    pub emp_length: u32,

    /// Home ownership (OWN, RENT, MORTGAGE, OTHER).
    #[arg(long, value_enum, default_value_t = HomeOwnership::Own)]
    pub home_ownership: HomeOwnership,

    /// Default on file (Y, N).
    #[arg(long, value_enum, default_value_t = DefaultFlag::Yes)]
    pub default_on_file: DefaultFlag,

    /// Credit history length in years.
    #[arg(long, default_value_t = 10)]
    pub cred_hist_length: u32,

    /// Loan intent.
    #[arg(long, value_enum, default_value_t = LoanIntent::Education)]
    pub loan_intent: LoanIntent,

    /// Loan grade (A best through G).
    #[arg(long, value_enum, default_value_t = LoanGrade::A)]
    pub loan_grade: LoanGrade,

    /// Loan amount (advised at least 5000).
    #[arg(long, default_value_t = 10_000)]
    pub loan_amnt: u64,

    /// Interest rate in percent (form range 5-25).
    #[arg(long, default_value_t = 12.5)]
    pub int_rate: f64,

    /// Loan amount as a fraction of income.
    #[arg(long, default_value_t = 0.2)]
    pub percent_income: f64,

    /// Print the aligned feature vector alongside the decision.
    #[arg(long)]
    pub show_features: bool,
}
