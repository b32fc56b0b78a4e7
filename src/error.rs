//! Custom error types for encrypt-csv
//!
//! This module defines the error hierarchy for the tool using thiserror
//! for ergonomic error definitions. Every failure in the pipeline is
//! propagated through these types up to `main`, which is the single
//! log-and-exit point.

use thiserror::Error;

/// The main error type for encrypt-csv operations
#[derive(Error, Debug)]
pub enum EncryptCsvError {
    /// Configuration-related errors (missing or invalid flags)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV parse or write errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Keyset file format errors (bad magic, truncated, undecodable)
    #[error("Keyset error: {0}")]
    Keyset(String),

    /// Encryption/decryption failures (incompatible key, bad ciphertext)
    #[error("Encryption error: {0}")]
    Encryption(String),
}

impl EncryptCsvError {
    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a keyset error
    pub fn is_keyset(&self) -> bool {
        matches!(self, Self::Keyset(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for EncryptCsvError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for EncryptCsvError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for encrypt-csv operations
pub type EncryptCsvResult<T> = Result<T, EncryptCsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EncryptCsvError::Config("fields flag is missing".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: fields flag is missing"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EncryptCsvError = io_err.into();
        assert!(matches!(err, EncryptCsvError::Io(_)));
    }

    #[test]
    fn test_is_config() {
        let err = EncryptCsvError::Config("bad".into());
        assert!(err.is_config());
        assert!(!err.is_keyset());
    }
}
