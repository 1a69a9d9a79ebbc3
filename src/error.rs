//! Error types for bom_prices
//!
//! Only table validation, configuration and local I/O produce errors.
//! Scraping problems degrade to missing data and never surface here.

use thiserror::Error;

/// Unified error type for bom_prices operations
#[derive(Debug, Error)]
pub enum BomError {
    /// First header cell is not literally `Key`
    #[error("Missing key column: first header cell must be \"Key\", found \"{found}\"")]
    MissingKeyColumn { found: String },
    /// The same distributor name appears twice in the header
    #[error("Duplicate distributor column: {0}")]
    DuplicateDistributorColumn(String),
    /// A configured base URL could not be parsed
    #[error("Invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
    /// HTTP client could not be constructed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Malformed tabular input or output failure
    #[error("Table error: {0}")]
    Csv(#[from] csv::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Replacing the output file with the finished temporary file failed
    #[error("Failed to replace output file: {0}")]
    TempFile(#[from] tempfile::PersistError),
}

/// Result alias for bom_prices operations
pub type Result<T> = std::result::Result<T, BomError>;
