//! Comma separated values with a header row
//!
//! The header names the columns; `x`, `y` and `z` are located
//! case-insensitively and may appear in any order among other columns.
//! Quoted fields are not supported.

use crate::error::ExtractError;
use crate::extract::{parse_coordinate, ExtractedPoints};

/// Positions of the coordinate columns in a CSV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvColumns {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl CsvColumns {
    /// Resolve the coordinate columns from a header line
    pub fn from_header(header: &str) -> Result<Self, ExtractError> {
        let missing = || ExtractError::MissingColumns {
            header: header.trim().to_string(),
        };

        if !header.contains(',') {
            return Err(missing());
        }

        let names: Vec<String> = header.split(',').map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| names.iter().position(|h| h == name);

        match (find("x"), find("y"), find("z")) {
            (Some(x), Some(y), Some(z)) => Ok(Self { x, y, z }),
            _ => Err(missing()),
        }
    }

    fn value<'a>(values: &[&'a str], index: usize, axis: &str, line: usize) -> Result<&'a str, ExtractError> {
        values.get(index).copied().ok_or_else(|| ExtractError::MalformedRow {
            line,
            reason: format!("missing {} column (index {})", axis, index),
        })
    }
}

/// Extract points from CSV text whose first row is a header
pub fn extract_csv(text: &str) -> Result<ExtractedPoints, ExtractError> {
    let mut rows = text.split('\n');
    let header = rows.next().unwrap_or_default();
    let columns = CsvColumns::from_header(header)?;

    let mut points = ExtractedPoints::new();
    for (i, row) in rows.enumerate() {
        let row = row.trim();
        if row.is_empty() {
            continue;
        }
        // Header is line 1
        let line = i + 2;

        let values: Vec<&str> = row.split(',').collect();
        let x = parse_coordinate(CsvColumns::value(&values, columns.x, "x", line)?, "x", line)?;
        let y = parse_coordinate(CsvColumns::value(&values, columns.y, "y", line)?, "y", line)?;
        let z = parse_coordinate(CsvColumns::value(&values, columns.z, "z", line)?, "z", line)?;
        points.push(x, y, z);
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfview_core::Point3d;

    #[test]
    fn test_basic_csv() {
        let points = extract_csv("x,y,z\n1,2,3\n4,5,6").unwrap();
        assert_eq!(points.points_2d, vec![1.0, 2.0, 4.0, 5.0]);
        assert_eq!(
            points.points_3d,
            vec![Point3d::new(1.0, 2.0, 3.0), Point3d::new(4.0, 5.0, 6.0)]
        );
        assert_eq!(points.z_min(), 3.0);
        assert_eq!(points.z_max(), 6.0);
    }

    #[test]
    fn test_header_is_case_insensitive_and_reordered() {
        let points = extract_csv(" Z , id, X ,Y\r\n9, a, 1, 2\r\n\r\n").unwrap();
        assert_eq!(points.points_3d, vec![Point3d::new(1.0, 2.0, 9.0)]);
    }

    #[test]
    fn test_column_resolution() {
        let columns = CsvColumns::from_header("id,x,y,z,x").unwrap();
        assert_eq!(columns, CsvColumns { x: 1, y: 2, z: 3 });
    }

    #[test]
    fn test_missing_columns() {
        assert!(matches!(
            extract_csv("a,b,c\n1,2,3"),
            Err(ExtractError::MissingColumns { .. })
        ));
        assert!(matches!(extract_csv("x y z\n1 2 3"), Err(ExtractError::MissingColumns { .. })));
        assert!(matches!(extract_csv(""), Err(ExtractError::MissingColumns { .. })));
    }

    #[test]
    fn test_short_row() {
        match extract_csv("x,y,z\n1,2,3\n4,5\n") {
            Err(ExtractError::MalformedRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only() {
        let points = extract_csv("x,y,z\n").unwrap();
        assert!(points.is_empty());
    }
}
