//! Error types for the data-loader crate.
//!
//! Loading failures are not recovered from anywhere in the workspace: they
//! bubble up to the binary and terminate the run with context attached.

use thiserror::Error;

/// Errors that can occur while loading and parsing the CSV inputs
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader itself failed (bad quoting, ragged rows, invalid UTF-8)
    #[error("CSV error in {file}: {source}")]
    CsvError {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// The header row lacks a column we rely on
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// A non-empty cell couldn't be parsed into its column type
    ///
    /// `line` is the 1-based line number in the file, header included
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
