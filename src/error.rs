//! Custom error types for rustcrossref.
//!
//! This module defines all error types used throughout the application.
//! All functions return `Result<T, AppError>` (or one of the narrower
//! component errors) instead of using `unwrap()`.

use thiserror::Error;

/// Errors raised by the CrossRef query client.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The search term was empty; no request was made
    #[error("Please enter a search term")]
    EmptyQuery,

    /// Network failure or non-2xx HTTP status
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body did not have the expected shape
    #[error("Unexpected response from CrossRef: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            QueryError::Parse(err.to_string())
        } else {
            QueryError::Transport(err.to_string())
        }
    }
}

/// Errors raised while writing a spreadsheet.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The file could not be written (bad path, permissions, library failure)
    #[error("Could not save file: {0}")]
    IoFailure(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoFailure(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::IoFailure(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::IoFailure(err.to_string())
    }
}

/// Main error type for rustcrossref operations.
///
/// Uses `thiserror` for ergonomic error handling and automatic `Display` implementation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Search failed
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Export failed
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Activated a record that has no link
    #[error("This article has no URL")]
    NoUrl,

    /// Activated a row number that is not displayed
    #[error("There is no row {0}")]
    NoSuchRow(usize),

    /// Browser could not be launched
    #[error("Could not open browser: {0}")]
    Browser(String),

    /// Unparseable interactive command
    #[error("{0}")]
    Command(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using `AppError`
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_converts_transparently() {
        let err: AppError = QueryError::Transport("connection refused".to_string()).into();
        assert_eq!(err.to_string(), "Request failed: connection refused");
        assert!(matches!(err, AppError::Query(QueryError::Transport(_))));
    }

    #[test]
    fn test_io_error_becomes_export_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ExportError::from(io);
        assert!(matches!(err, ExportError::IoFailure(ref m) if m.contains("denied")));
    }
}
