//! Delaunay triangulation of height field points
//!
//! Points are triangulated on their `(x, y)` projection; `z` is carried
//! through as the height when the triangle soup is assembled.

use serde::{Deserialize, Serialize};
use spade::{DelaunayTriangulation, Point2, Triangulation};
use surfview_core::{Error, HeightAxis, IndexedMesh, Point3d, Point3f, Result};
use tracing::debug;

/// Which world axis the dataset's `z` column maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpAxis {
    /// `(x, y, z)` becomes `(x, z, y)` so heights point up in a Y-up scene
    #[default]
    Y,
    /// Points are used as-is
    Z,
}

impl UpAxis {
    /// Map a dataset point into the scene frame
    pub fn apply(&self, point: &Point3d) -> Point3f {
        match self {
            UpAxis::Y => Point3f::new(point.x as f32, point.z as f32, point.y as f32),
            UpAxis::Z => Point3f::new(point.x as f32, point.y as f32, point.z as f32),
        }
    }

    /// Scene axis holding the dataset's `z` after [`UpAxis::apply`]
    pub fn height_axis(&self) -> HeightAxis {
        match self {
            UpAxis::Y => HeightAxis::Y,
            UpAxis::Z => HeightAxis::Z,
        }
    }
}

impl std::str::FromStr for UpAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" => Ok(UpAxis::Y),
            "z" => Ok(UpAxis::Z),
            other => Err(Error::InvalidData(format!("Unknown up axis '{}'", other))),
        }
    }
}

/// Triangulate flat `[x0, y0, x1, y1, ...]` coordinates.
///
/// Returns a flat triangle list (stride 3, counter-clockwise) of positions
/// in the input. Points sharing a 2D position are triangulated once and
/// referenced by their first occurrence. Collinear input produces no
/// triangles.
pub fn triangulate(points_2d: &[f64]) -> Result<Vec<usize>> {
    if points_2d.len() % 2 != 0 {
        return Err(Error::InvalidData(format!(
            "Coordinate list has odd length {}",
            points_2d.len()
        )));
    }

    let point_count = points_2d.len() / 2;
    if point_count < 3 {
        return Err(Error::InvalidData("Need at least 3 points for triangulation".to_string()));
    }

    if let Some(bad) = points_2d.iter().position(|c| !c.is_finite()) {
        return Err(Error::Algorithm(format!(
            "Point {} has a non-finite coordinate",
            bad / 2
        )));
    }

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();

    // Vertex handle index -> first input index at that position
    let mut first_input: Vec<Option<usize>> = Vec::with_capacity(point_count);

    for (i, xy) in points_2d.chunks_exact(2).enumerate() {
        let handle = triangulation
            .insert(Point2::new(xy[0], xy[1]))
            .map_err(|e| Error::Algorithm(format!("Failed to insert point {} in Delaunay triangulation: {:?}", i, e)))?;

        let slot = handle.index();
        if slot >= first_input.len() {
            first_input.resize(slot + 1, None);
        }
        first_input[slot].get_or_insert(i);
    }

    let mut triangles = Vec::with_capacity(triangulation.num_inner_faces() * 3);
    for face in triangulation.inner_faces() {
        for vertex in face.vertices() {
            let index = first_input
                .get(vertex.fix().index())
                .copied()
                .flatten()
                .ok_or_else(|| Error::Algorithm("Failed to match triangle vertex to original point".to_string()))?;
            triangles.push(index);
        }
    }

    debug!(
        "Triangulated {} points ({} unique) into {} triangles",
        point_count,
        triangulation.num_vertices(),
        triangles.len() / 3
    );

    Ok(triangles)
}

/// Expand a triangle list into a non-indexed mesh with a `position` attribute.
///
/// With [`UpAxis::Y`] the winding of every triangle is reversed along with
/// the axis swap, so faces that were counter-clockwise seen from +Z stay
/// front-facing seen from +Y.
pub fn triangle_soup(points_3d: &[Point3d], triangles: &[usize], up_axis: UpAxis) -> Result<IndexedMesh> {
    if triangles.len() % 3 != 0 {
        return Err(Error::InvalidData(format!(
            "Triangle list length {} is not a multiple of 3",
            triangles.len()
        )));
    }
    if let Some(&bad) = triangles.iter().find(|&&i| i >= points_3d.len()) {
        return Err(Error::InvalidData(format!(
            "Triangle index {} out of range for {} points",
            bad,
            points_3d.len()
        )));
    }

    let mut positions = Vec::with_capacity(triangles.len());
    for tri in triangles.chunks_exact(3) {
        let order = match up_axis {
            UpAxis::Y => [tri[0], tri[2], tri[1]],
            UpAxis::Z => [tri[0], tri[1], tri[2]],
        };
        positions.extend(order.iter().map(|&i| up_axis.apply(&points_3d[i])));
    }

    Ok(IndexedMesh::soup_from_positions(&positions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn signed_area(points: &[f64], tri: &[usize]) -> f64 {
        let p = |i: usize| (points[i * 2], points[i * 2 + 1]);
        let (ax, ay) = p(tri[0]);
        let (bx, by) = p(tri[1]);
        let (cx, cy) = p(tri[2]);
        0.5 * ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay))
    }

    #[test]
    fn test_single_triangle() {
        let points = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let triangles = triangulate(&points).unwrap();

        assert_eq!(triangles.len(), 3);
        let mut sorted = triangles.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2]);
        assert!(signed_area(&points, &triangles) > 0.0);
    }

    #[test]
    fn test_square_with_center() {
        let points = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.5, 0.5];
        let triangles = triangulate(&points).unwrap();

        assert_eq!(triangles.len(), 12);
        for tri in triangles.chunks(3) {
            assert!(tri.contains(&4));
            assert!(signed_area(&points, tri) > 0.0);
        }
    }

    #[test]
    fn test_duplicates_use_first_occurrence() {
        let points = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
        let triangles = triangulate(&points).unwrap();

        assert_eq!(triangles.len(), 3);
        assert!(!triangles.contains(&3));
    }

    #[test]
    fn test_collinear_is_empty() {
        let points = [0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0];
        assert!(triangulate(&points).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(triangulate(&[0.0, 0.0, 1.0, 0.0]), Err(Error::InvalidData(_))));
        assert!(matches!(triangulate(&[0.0, 0.0, 1.0, 0.0, 0.0]), Err(Error::InvalidData(_))));
        assert!(matches!(
            triangulate(&[0.0, 0.0, 1.0, f64::NAN, 0.0, 1.0]),
            Err(Error::Algorithm(_))
        ));
    }

    #[test]
    fn test_soup_y_up_flips_winding() {
        let points = [
            Point3d::new(0.0, 0.0, 5.0),
            Point3d::new(1.0, 0.0, 6.0),
            Point3d::new(0.0, 1.0, 7.0),
        ];
        let soup = triangle_soup(&points, &[0, 1, 2], UpAxis::Y).unwrap();

        assert!(!soup.is_indexed());
        assert_eq!(
            soup.positions(),
            vec![
                Point3f::new(0.0, 5.0, 0.0),
                Point3f::new(0.0, 7.0, 1.0),
                Point3f::new(1.0, 6.0, 0.0),
            ]
        );

        let flat = [
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
        ];
        let normals = triangle_soup(&flat, &[0, 1, 2], UpAxis::Y)
            .unwrap()
            .calculate_vertex_normals();
        for n in normals {
            assert_relative_eq!(n.y, 1.0);
        }
    }

    #[test]
    fn test_soup_z_up_keeps_points() {
        let points = [
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
        ];
        let soup = triangle_soup(&points, &[0, 1, 2], UpAxis::Z).unwrap();
        assert_eq!(soup.positions()[1], Point3f::new(1.0, 0.0, 0.0));

        for n in soup.calculate_vertex_normals() {
            assert_relative_eq!(n.z, 1.0);
        }
    }

    #[test]
    fn test_soup_rejects_bad_indices() {
        let points = [Point3d::new(0.0, 0.0, 0.0)];
        assert!(triangle_soup(&points, &[0, 0, 1], UpAxis::Y).is_err());
        assert!(triangle_soup(&points, &[0, 0], UpAxis::Y).is_err());
    }

    #[test]
    fn test_up_axis_parse() {
        assert_eq!("Y".parse::<UpAxis>().unwrap(), UpAxis::Y);
        assert_eq!("z".parse::<UpAxis>().unwrap(), UpAxis::Z);
        assert!("x".parse::<UpAxis>().is_err());
    }
}
