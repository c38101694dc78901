//! Coordinate extraction
//!
//! Turns one of the supported textual encodings into the two parallel point
//! arrays the rest of the pipeline needs:
//! - a flat `[x0, y0, x1, y1, ...]` array handed to the triangulator
//! - the matching `(x, y, z)` points used to look up heights afterwards
//!
//! The running min/max of `z` is tracked while parsing. Any malformed record
//! fails the whole extraction; partial results are never returned.

use crate::csv::extract_csv;
use crate::error::ExtractError;
use crate::format::DataFormat;
use crate::json::extract_str;
use crate::plain_text::extract_plain_text;
use serde::{Deserialize, Serialize};
use surfview_core::{HeightRange, Point3d};

/// Points parsed from a dataset, in input order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedPoints {
    /// Flat `(x, y)` pairs for triangulation
    pub points_2d: Vec<f64>,
    /// `(x, y, z)` points parallel to `points_2d`
    pub points_3d: Vec<Point3d>,
    /// Bounds of the `z` values, empty when no points were accepted
    pub height_range: HeightRange,
}

impl ExtractedPoints {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty result with room for `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points_2d: Vec::with_capacity(capacity * 2),
            points_3d: Vec::with_capacity(capacity),
            height_range: HeightRange::new(),
        }
    }

    /// Append one accepted record
    pub fn push(&mut self, x: f64, y: f64, z: f64) {
        self.height_range.include(z);
        self.points_2d.push(x);
        self.points_2d.push(y);
        self.points_3d.push(Point3d::new(x, y, z));
    }

    /// Number of accepted points
    pub fn len(&self) -> usize {
        self.points_3d.len()
    }

    /// Check whether no point was accepted
    pub fn is_empty(&self) -> bool {
        self.points_3d.is_empty()
    }

    /// Smallest `z`, `+inf` when empty
    pub fn z_min(&self) -> f64 {
        self.height_range.min
    }

    /// Largest `z`, `-inf` when empty
    pub fn z_max(&self) -> f64 {
        self.height_range.max
    }
}

/// Extract points from raw text in the given format.
///
/// JSON text is decoded first; use [`crate::extract_json`] directly when
/// the document is already decoded.
pub fn extract(data: &str, format: DataFormat) -> Result<ExtractedPoints, ExtractError> {
    match format {
        DataFormat::Json => extract_str(data),
        DataFormat::PlainText => extract_plain_text(data),
        DataFormat::Csv => extract_csv(data),
    }
}

/// Parse a single coordinate token, rejecting anything that is not a
/// finite number.
pub(crate) fn parse_coordinate(token: &str, axis: &str, line: usize) -> Result<f64, ExtractError> {
    let token = token.trim();
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ExtractError::MalformedRow {
            line,
            reason: format!("invalid {} coordinate '{}'", axis, token),
        }),
    }
}
