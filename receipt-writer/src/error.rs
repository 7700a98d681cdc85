//! Error types for the writer library

use thiserror::Error;

/// Writer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// IO error while building the byte stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Charset label not known to the encoder
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Invalid writer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for writer operations
pub type PrintResult<T> = Result<T, PrintError>;
