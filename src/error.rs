//! Error types for staffel
//!
//! The first group of variants are the user-facing failures of a quote. Each
//! one maps to exactly one condition and its message is meant to be shown
//! as-is. The rest are plumbing errors from I/O and the parsers.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// staffel errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("The file is empty or could not be parsed as a tariff table")]
    EmptyFile,

    #[error("Could not read the tariff file: {0}")]
    Unreadable(String),

    #[error("The tariff table contains no rows")]
    NoRows,

    #[error("Enter a valid postcode (at least 2 digits)")]
    InvalidPostcode,

    #[error("Enter a valid weight (a number greater than 0)")]
    InvalidWeight,

    #[error("No row found for postcode prefix {prefix}")]
    NoMatchingRow { prefix: String },

    #[error("No tier columns found (expected headers like \"1 ton\", \"2 ton\", ...)")]
    NoTierColumns,

    #[error("Empty or invalid tariff in column \"{column}\"")]
    InvalidTariffCell { column: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
