//! `loan-screener` library crate.
//!
//! The binary (`loan`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future batch tooling or a service front-end)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod features;
pub mod model;
pub mod report;
pub mod tui;
pub mod validate;
