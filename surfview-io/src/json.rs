//! JSON point records
//!
//! The document must be an array of objects with numeric `x`, `y` and `z`
//! members. Extra members are ignored.

use crate::error::ExtractError;
use crate::extract::ExtractedPoints;
use serde_json::Value;

const AXES: [&str; 3] = ["x", "y", "z"];

/// Extract points from an already decoded JSON document
pub fn extract_json(document: &Value) -> Result<ExtractedPoints, ExtractError> {
    let records = document.as_array().ok_or_else(|| ExtractError::MalformedRecord {
        index: 0,
        field: "<document>".to_string(),
    })?;

    let mut points = ExtractedPoints::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let mut coords = [0.0; 3];
        for (coord, axis) in coords.iter_mut().zip(AXES) {
            *coord = record
                .get(axis)
                .and_then(Value::as_f64)
                .ok_or_else(|| ExtractError::MalformedRecord {
                    index,
                    field: axis.to_string(),
                })?;
        }
        points.push(coords[0], coords[1], coords[2]);
    }

    Ok(points)
}

/// Decode JSON text and extract its points
pub fn extract_str(text: &str) -> Result<ExtractedPoints, ExtractError> {
    let document: Value = serde_json::from_str(text)?;
    extract_json(&document)
}
