//! Error types for the update pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the update pipeline's error type
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Errors surfaced by the update pipeline
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Transport-level HTTP failure (DNS, connect, TLS, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with an error status
    #[error("HTTP status {status}: {reason}")]
    HttpStatus { status: u16, reason: String },

    /// Malformed manifest JSON, version string, or URL
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Downloaded byte count differs from the declared archive size
    #[error("Invalid file size: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// Computed digest differs from the declared checksum
    #[error("Checksum verification failed: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// Corrupt or empty update archive
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// Expected file absent after extraction
    #[error("File not found: {path}")]
    MissingFile { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Filesystem(#[from] std::io::Error),

    /// Manifest failed the validity gate
    #[error("invalid version update")]
    InvalidManifest,

    /// Operation aborted by cancellation request
    #[error("update cancelled")]
    Cancelled,

    /// Background task failed to deliver a result
    #[error("Task error: {message}")]
    Task { message: String },
}

impl UpdateError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an archive error
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, reason: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            reason: reason.into(),
        }
    }

    /// Create a missing file error
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// Create a task error
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }
}
