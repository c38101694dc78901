//! Error types for point extraction and file I/O

use thiserror::Error;

/// Errors that can occur while turning raw input into points
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Record {index} has no numeric '{field}' field")]
    MalformedRecord { index: usize, field: String },

    #[error("Line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("CSV header must be comma separated and contain x, y and z columns, got '{header}'")]
    MissingColumns { header: String },

    #[error("Invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unsupported data format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExtractError> for surfview_core::Error {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::Io(io) => surfview_core::Error::Io(io),
            ExtractError::UnsupportedFormat(format) => surfview_core::Error::UnsupportedFormat(format),
            other => surfview_core::Error::Extract(Box::new(other)),
        }
    }
}
