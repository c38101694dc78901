//! Input data format tags

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Textual encodings the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataFormat {
    /// Array of `{x, y, z}` records
    Json,
    /// One space separated `x y z` triple per line
    PlainText,
    /// Comma separated values with an `x,y,z` header
    Csv,
}

impl DataFormat {
    /// All supported formats
    pub const ALL: [DataFormat; 3] = [DataFormat::Json, DataFormat::PlainText, DataFormat::Csv];

    /// MIME type of the format
    pub fn mime(&self) -> &'static str {
        match self {
            DataFormat::Json => "application/json",
            DataFormat::PlainText => "text/plain",
            DataFormat::Csv => "text/csv",
        }
    }

    /// File extension of the format
    pub fn extension(&self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::PlainText => "txt",
            DataFormat::Csv => "csv",
        }
    }

    /// Look up a format by MIME type
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim();
        Self::ALL.into_iter().find(|format| format.mime().eq_ignore_ascii_case(mime))
    }

    /// Look up a format by file extension, case-insensitively
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }

    /// Detect the format of a file from its extension
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                ExtractError::UnsupportedFormat(format!(
                    "Cannot infer data format from {:?}",
                    path.file_name().unwrap_or(path.as_os_str())
                ))
            })
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

impl FromStr for DataFormat {
    type Err = ExtractError;

    /// Accepts a MIME type or a file extension
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_mime(s)
            .or_else(|| Self::from_extension(s))
            .ok_or_else(|| ExtractError::UnsupportedFormat(s.to_string()))
    }
}
