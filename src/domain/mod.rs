//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - applicant input enums (`HomeOwnership`, `DefaultFlag`, `LoanIntent`, `LoanGrade`)
//! - the per-request applicant record (`ApplicantRecord`)
//! - the artifact-facing feature schema (`ModelSchema`)
//! - prediction output (`PredictionResult`)

pub mod types;

pub use types::*;
