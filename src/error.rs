//! Error types for the budget dashboard.
//!
//! Only boundary failures are errors. Malformed amounts, missing account
//! numbers and empty filter results are normalized inside the engine.

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors that can occur while loading a ledger or writing a report.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Failed to open or read the ledger file, or to write output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The ledger document is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The ledger document parsed, but its top level is not an array
    #[error("Ledger must be a JSON array of rows, found {found}")]
    NotAnArray { found: &'static str },
}
