//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the model artifact (once, before any UI renders)
//! - dispatches to the `predict`/`schema` printers or the TUI form

use std::path::Path;

use clap::Parser;

use crate::cli::{ApplicantArgs, Command};
use crate::domain::ApplicantRecord;
use crate::error::AppError;
use crate::model::{load_artifact, ModelArtifact, MODEL_PATH};

pub mod pipeline;

/// Entry point for the `loan` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `loan` to behave like `loan tui`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the form as the default surface.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    // The artifact is loaded exactly once and treated as read-only shared
    // state for the rest of the process. Missing file aborts here, before
    // any UI renders.
    let artifact = load_artifact(Path::new(MODEL_PATH))?;

    match cli.command {
        Command::Predict(args) => handle_predict(&artifact, &args),
        Command::Schema => {
            print!("{}", crate::report::format_schema(&artifact.schema));
            Ok(())
        }
        Command::Tui => crate::tui::run(&artifact),
    }
}

fn handle_predict(artifact: &ModelArtifact, args: &ApplicantArgs) -> Result<(), AppError> {
    let record = applicant_from_args(args)?;
    let output = pipeline::run_screen(artifact, &record)?;
    print!(
        "{}",
        crate::report::format_screen_output(&output, args.show_features)
    );
    Ok(())
}

/// Build an `ApplicantRecord` from `predict` flags.
///
/// Range checks stay advisory, but non-finite float inputs (clap accepts
/// `NaN`/`inf` for f64 flags) would poison inference, so they are rejected
/// here with a clear message.
pub fn applicant_from_args(args: &ApplicantArgs) -> Result<ApplicantRecord, AppError> {
    if !args.int_rate.is_finite() {
        return Err(AppError::new(3, "Interest rate must be a finite number."));
    }
    if !args.percent_income.is_finite() {
        return Err(AppError::new(3, "Percent income must be a finite number."));
    }

    Ok(ApplicantRecord {
        age: args.age,
        income: args.income,
        emp_length: args.emp_length,
        home_ownership: args.home_ownership,
        default_on_file: args.default_on_file,
        cred_hist_length: args.cred_hist_length,
        loan_intent: args.loan_intent,
        loan_grade: args.loan_grade,
        loan_amnt: args.loan_amnt,
        int_rate: args.int_rate,
        percent_income: args.percent_income,
    })
}

/// Rewrite argv so `loan` defaults to `loan tui`.
///
/// Rules:
/// - `loan`                    -> `loan tui`
/// - `loan --help/--version`   -> unchanged (show top-level help/version)
/// - `loan predict ...` etc.   -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "predict" | "schema" | "tui");
    if is_subcommand {
        return argv;
    }

    // Anything else is left for clap to report.
    argv
}
