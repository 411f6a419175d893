//! Custom error types for splitbook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for splitbook operations
#[derive(Error, Debug)]
pub enum SplitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// An input record that cannot become a `RawEntry`
    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// A record whose ownership cannot be decided
    #[error("Cannot classify '{category}': {reason}")]
    Classification { category: String, reason: String },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SplitError {
    /// Create a malformed record error for a 1-based data row
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }

    /// Check if this is a malformed record error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }

    /// Check if this is a classification error
    pub fn is_classification(&self) -> bool {
        matches!(self, Self::Classification { .. })
    }
}

impl From<std::io::Error> for SplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SplitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for SplitError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for splitbook operations
pub type SplitResult<T> = Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SplitError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_malformed_record_error() {
        let err = SplitError::malformed(3, "invalid date '2025-13-01'");
        assert_eq!(
            err.to_string(),
            "Malformed record at row 3: invalid date '2025-13-01'"
        );
        assert!(err.is_malformed());
        assert!(!err.is_classification());
    }

    #[test]
    fn test_classification_error() {
        let err = SplitError::Classification {
            category: "Personal_Food".into(),
            reason: "personal expense without a payer".into(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot classify 'Personal_Food': personal expense without a payer"
        );
        assert!(err.is_classification());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let split_err: SplitError = io_err.into();
        assert!(matches!(split_err, SplitError::Io(_)));
    }
}
