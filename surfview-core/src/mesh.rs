//! Indexed triangle meshes

use crate::attribute::{VertexAttribute, VertexAttributeSet, NORMAL, POSITION};
use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// A triangle list over a set of named vertex attributes.
///
/// Without an index buffer the mesh is a triangle soup: vertex `i` is used
/// by triangle `i / 3`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedMesh {
    pub attributes: VertexAttributeSet,
    pub indices: Option<Vec<usize>>,
}

impl IndexedMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a triangle soup from a position list (three vertices per triangle)
    pub fn soup_from_positions(positions: &[Point3f]) -> Self {
        let attributes = if positions.is_empty() {
            VertexAttributeSet::new()
        } else {
            VertexAttributeSet::from_parts(
                vec![(POSITION.to_string(), VertexAttribute::from_points(positions))],
                Vec::new(),
            )
        };
        Self {
            attributes,
            indices: None,
        }
    }

    /// Create an indexed mesh, checking every index against the vertex count
    pub fn from_parts(attributes: VertexAttributeSet, indices: Option<Vec<usize>>) -> Result<Self> {
        let vertex_count = attributes.vertex_count();
        if let Some(indices) = &indices {
            if let Some(bad) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(Error::InvalidData(format!(
                    "Index {} out of range for {} vertices",
                    bad, vertex_count
                )));
            }
        }
        Ok(Self {
            attributes,
            indices,
        })
    }

    /// Get the number of stored vertices
    pub fn vertex_count(&self) -> usize {
        self.attributes.vertex_count()
    }

    /// Number of entries in the triangle list (indices, or vertices for a soup)
    pub fn element_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.vertex_count(),
        }
    }

    /// Get the number of triangles
    pub fn face_count(&self) -> usize {
        self.element_count() / 3
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Check whether the mesh carries an index buffer
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Vertex index of triangle-list entry `i`
    pub fn vertex_index(&self, i: usize) -> usize {
        match &self.indices {
            Some(indices) => indices[i],
            None => i,
        }
    }

    /// Triangles as vertex index triples
    pub fn faces(&self) -> Vec<[usize; 3]> {
        (0..self.face_count())
            .map(|f| {
                [
                    self.vertex_index(f * 3),
                    self.vertex_index(f * 3 + 1),
                    self.vertex_index(f * 3 + 2),
                ]
            })
            .collect()
    }

    /// The position attribute, if present
    pub fn position_attribute(&self) -> Option<&VertexAttribute> {
        self.attributes.get(POSITION)
    }

    /// Vertex positions as points
    pub fn positions(&self) -> Vec<Point3f> {
        match self.position_attribute() {
            Some(attr) => (0..attr.count()).map(|i| attr.point(i)).collect(),
            None => Vec::new(),
        }
    }

    /// Vertex normals, if the mesh has them
    pub fn normals(&self) -> Option<Vec<Vector3f>> {
        self.attributes
            .get(NORMAL)
            .map(|attr| (0..attr.count()).map(|i| attr.point(i).coords).collect())
    }

    /// Add or replace a named attribute
    pub fn set_attribute(&mut self, name: impl Into<String>, attribute: VertexAttribute) -> Result<()> {
        self.attributes.insert(name, attribute)
    }

    /// Check that every face references a stored vertex with a position.
    ///
    /// Meshes built through [`IndexedMesh::from_parts`] and
    /// [`IndexedMesh::set_attribute`] pass unless the position attribute is
    /// missing; edited fields or deserialized meshes may not.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertex_count();
        if let Some(indices) = &self.indices {
            if let Some(bad) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(Error::InvalidData(format!(
                    "Index {} out of range for {} vertices",
                    bad, vertex_count
                )));
            }
        }
        if self.face_count() > 0 {
            match self.position_attribute() {
                None => return Err(Error::InvalidData("Mesh has no position attribute".to_string())),
                Some(attr) if attr.count() < vertex_count => {
                    return Err(Error::InvalidData(format!(
                        "Position attribute has {} vertices, expected {}",
                        attr.count(),
                        vertex_count
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Calculate per-face normals (unit length, zero for degenerate faces).
    ///
    /// Empty when the mesh fails [`IndexedMesh::validate`].
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        if self.validate().is_err() {
            return Vec::new();
        }
        let positions = self.positions();
        self.faces()
            .iter()
            .map(|face| {
                let v0 = positions[face[0]];
                let v1 = positions[face[1]];
                let v2 = positions[face[2]];

                let edge1 = v1 - v0;
                let edge2 = v2 - v0;

                edge1.cross(&edge2).try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros)
            })
            .collect()
    }

    /// Calculate area-weighted vertex normals.
    ///
    /// Each face adds its unnormalized cross product to its three vertices;
    /// the sums are normalized at the end. Vertices not referenced by any
    /// face get a zero normal. Empty when the mesh fails
    /// [`IndexedMesh::validate`].
    pub fn calculate_vertex_normals(&self) -> Vec<Vector3f> {
        if self.validate().is_err() {
            return Vec::new();
        }
        let positions = self.positions();
        let mut normals = vec![Vector3f::zeros(); positions.len()];

        for face in self.faces() {
            let v0 = positions[face[0]];
            let v1 = positions[face[1]];
            let v2 = positions[face[2]];
            let weighted = (v2 - v1).cross(&(v0 - v1));

            for &vertex in &face {
                normals[vertex] += weighted;
            }
        }

        for normal in &mut normals {
            *normal = normal.try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros);
        }
        normals
    }

    /// Compute vertex normals and store them as the `normal` attribute
    pub fn compute_vertex_normals(&mut self) -> Result<()> {
        self.validate()?;
        let normals = self.calculate_vertex_normals();
        self.attributes.insert(NORMAL, VertexAttribute::from_vectors(&normals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad_soup() -> IndexedMesh {
        IndexedMesh::soup_from_positions(&[
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn test_soup_counts() {
        let mesh = quad_soup();
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces(), vec![[0, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn test_from_parts_checks_indices() {
        let soup = quad_soup();
        let ok = IndexedMesh::from_parts(soup.attributes.clone(), Some(vec![0, 1, 2]));
        assert!(ok.is_ok());

        let bad = IndexedMesh::from_parts(soup.attributes, Some(vec![0, 1, 6]));
        assert!(matches!(bad, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = IndexedMesh::soup_from_positions(&[]);
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert!(mesh.positions().is_empty());
    }

    #[test]
    fn test_face_normals() {
        let normals = quad_soup().calculate_face_normals();
        assert_eq!(normals.len(), 2);
        for normal in normals {
            assert_relative_eq!(normal, Vector3f::new(0.0, 0.0, 1.0), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_compute_vertex_normals() {
        let mut mesh = quad_soup();
        mesh.compute_vertex_normals().unwrap();

        let normals = mesh.normals().unwrap();
        assert_eq!(normals.len(), 6);
        for normal in normals {
            assert_relative_eq!(normal, Vector3f::new(0.0, 0.0, 1.0), epsilon = 1e-6);
        }
        let names: Vec<&str> = mesh.attributes.names().collect();
        assert_eq!(names, vec!["position", "normal"]);
    }

    fn uv_only_mesh() -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        mesh.set_attribute("uv", VertexAttribute::new(vec![0.0; 6], 2).unwrap())
            .unwrap();
        mesh
    }

    #[test]
    fn test_normals_without_positions() {
        let mut mesh = uv_only_mesh();
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.calculate_vertex_normals().is_empty());
        assert!(mesh.calculate_face_normals().is_empty());
        assert!(matches!(mesh.compute_vertex_normals(), Err(Error::InvalidData(_))));
        assert!(mesh.normals().is_none());
    }

    #[test]
    fn test_validate_catches_edited_indices() {
        let mut mesh = quad_soup();
        assert!(mesh.validate().is_ok());

        mesh.indices = Some(vec![0, 1, 9]);
        assert!(matches!(mesh.validate(), Err(Error::InvalidData(_))));
        assert!(mesh.calculate_vertex_normals().is_empty());
        assert!(mesh.compute_vertex_normals().is_err());
    }
}
