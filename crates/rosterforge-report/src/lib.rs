//! Signup ingestion and roster reports for RosterForge.
//!
//! - [`read_signups`] / [`parse_signups`] - signup CSV to players
//! - [`MarkdownReport`] - `teams.md`
//! - [`AssignmentsCsv`] - `assignments.csv`
//! - [`TextSummary`] - console summary of the diagnostics

mod csv_export;
mod markdown;
mod signups;
mod summary;

pub use csv_export::AssignmentsCsv;
pub use markdown::MarkdownReport;
pub use signups::{parse_signups, read_signups, REQUIRED_COLUMNS};
pub use summary::TextSummary;

use thiserror::Error;

/// File name of the Markdown roster in a run directory.
pub const TEAMS_MARKDOWN_FILE: &str = "teams.md";
/// File name of the assignment CSV in a run directory.
pub const ASSIGNMENTS_CSV_FILE: &str = "assignments.csv";

/// Report and ingestion errors.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns in signups CSV: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("Invalid signups data: {0}")]
    Invalid(String),
}
