//! Error types for the markup library

use thiserror::Error;

/// Document encoding error types
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The conversion tool exited with a failure status
    #[error("Encoder tool failed (exit {status}): {stderr}")]
    ToolFailed { status: i32, stderr: String },

    /// IO error while launching the tool or moving document data
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tool produced output that could not be read back
    #[error("Encoder output missing: {0}")]
    MissingOutput(String),
}

/// Result type for encoder operations
pub type EncodeResult<T> = Result<T, EncodeError>;
