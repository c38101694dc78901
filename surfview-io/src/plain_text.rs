//! Space separated `x y z` rows
//!
//! Rows are split on single spaces, so runs of spaces produce empty tokens.
//! Only the first three tokens are read; anything after them is ignored.

use crate::error::ExtractError;
use crate::extract::{parse_coordinate, ExtractedPoints};

/// Extract points from newline separated `x y z` rows
pub fn extract_plain_text(text: &str) -> Result<ExtractedPoints, ExtractError> {
    let mut points = ExtractedPoints::new();

    for (i, row) in text.split('\n').enumerate() {
        if row.trim().is_empty() {
            continue;
        }
        let line = i + 1;

        let tokens: Vec<&str> = row.split(' ').map(str::trim).collect();
        if tokens.len() < 3 {
            return Err(ExtractError::MalformedRow {
                line,
                reason: format!("expected at least 3 values, found {}", tokens.len()),
            });
        }

        let x = parse_coordinate(tokens[0], "x", line)?;
        let y = parse_coordinate(tokens[1], "y", line)?;
        let z = parse_coordinate(tokens[2], "z", line)?;
        points.push(x, y, z);
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfview_core::Point3d;

    #[test]
    fn test_extract_rows() {
        let points = extract_plain_text("1 2 3\n4.5 -5 6\n").unwrap();
        assert_eq!(points.points_2d, vec![1.0, 2.0, 4.5, -5.0]);
        assert_eq!(points.points_3d[1], Point3d::new(4.5, -5.0, 6.0));
        assert_eq!(points.z_min(), 3.0);
        assert_eq!(points.z_max(), 6.0);
    }

    #[test]
    fn test_blank_rows_and_crlf() {
        let points = extract_plain_text("\r\n1 2 3\r\n   \n4 5 6 extra\r\n").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points.points_3d[0], Point3d::new(1.0, 2.0, 3.0));
        assert_eq!(points.points_3d[1], Point3d::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_short_row_fails() {
        match extract_plain_text("1 2 3\n4 5\n") {
            Err(ExtractError::MalformedRow { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_double_space_yields_empty_token() {
        assert!(matches!(
            extract_plain_text("1  2 3"),
            Err(ExtractError::MalformedRow { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let points = extract_plain_text("").unwrap();
        assert!(points.is_empty());
        assert!(points.height_range.is_empty());
    }
}
