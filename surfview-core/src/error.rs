//! Error types for surfview

use thiserror::Error;

/// Main error type for surfview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Malformed dataset contents; the source is the reader's own error
    #[error("Failed to extract points")]
    Extract(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for surfview operations
pub type Result<T> = std::result::Result<T, Error>;
