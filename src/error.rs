//! Error types for TextHash
//!
//! This module defines all error types used throughout the crate,
//! providing detailed error information for logging and user feedback.

use crate::config::HashAlgorithm;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for TextHash operations
#[derive(Error, Debug)]
pub enum HashToolError {
    /// I/O error while reading input
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// File the error relates to (`<stdin>` for standard input)
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Input exceeds the configured size limit
    #[error("Input too large: {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge {
        /// Input size in bytes (at least `limit + 1` for streams)
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// Expected digest is not a hex string
    #[error("Malformed digest: {0}")]
    MalformedDigest(String),

    /// Algorithm name not recognized
    #[error("Unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Algorithm has no HMAC construction
    #[error("HMAC is not available for {}", .0.name())]
    HmacUnsupported(HashAlgorithm),

    /// HMAC requested without a key
    #[error("HMAC key must not be empty")]
    EmptyKey,

    /// Clipboard write failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl HashToolError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed digest error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDigest(message.into())
    }

    /// Create a clipboard error
    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Check if this error came from the caller's input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InputTooLarge { .. }
                | Self::MalformedDigest(_)
                | Self::UnknownAlgorithm(_)
                | Self::HmacUnsupported(_)
                | Self::EmptyKey
        )
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for TextHash operations
pub type Result<T> = std::result::Result<T, HashToolError>;

impl From<std::io::Error> for HashToolError {
    fn from(err: std::io::Error) -> Self {
        HashToolError::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for HashToolError {
    fn from(err: serde_json::Error) -> Self {
        HashToolError::ConfigError(err.to_string())
    }
}

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| HashToolError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = HashToolError::io("/test/input.txt", io_err);
        assert_eq!(err.path().unwrap(), &PathBuf::from("/test/input.txt"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_input_errors() {
        assert!(HashToolError::EmptyKey.is_input_error());
        assert!(HashToolError::malformed("zz").is_input_error());
        assert!(HashToolError::InputTooLarge { size: 10, limit: 5 }.is_input_error());
        assert!(!HashToolError::clipboard("no display").is_input_error());
    }

    #[test]
    fn test_hmac_unsupported_message() {
        let err = HashToolError::HmacUnsupported(HashAlgorithm::Blake3);
        assert_eq!(err.to_string(), "HMAC is not available for BLAKE3");
    }
}
