//! GPU-ready vertex and index buffers

use bytemuck::{Pod, Zeroable};
use surfview_core::{Error, IndexedMesh, Point3f, Result};

/// Interleaved surface vertex, matching `VertexInput` in the surface shader
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Source point vertex for the point cloud overlay
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
}

/// Vertex and index data of one mesh
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBuffers {
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u32>,
}

impl RenderBuffers {
    /// Interleave positions and normals. Missing normals are zero.
    ///
    /// Non-indexed meshes get a `0..n` index buffer. Meshes with more
    /// vertices than `u32` can address are rejected.
    pub fn from_mesh(mesh: &IndexedMesh) -> Result<Self> {
        let positions = mesh.positions();
        let normals = mesh.normals();

        if u32::try_from(positions.len()).is_err() {
            return Err(Error::InvalidData(format!(
                "Mesh has {} vertices, more than a 32-bit index buffer can address",
                positions.len()
            )));
        }

        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, p)| SurfaceVertex {
                position: [p.x, p.y, p.z],
                normal: normals
                    .as_ref()
                    .and_then(|n| n.get(i))
                    .map(|n| [n.x, n.y, n.z])
                    .unwrap_or([0.0; 3]),
            })
            .collect();

        let indices = (0..mesh.element_count())
            .map(|i| mesh.vertex_index(i) as u32)
            .collect();

        Ok(Self { vertices, indices })
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Index list drawing every triangle edge once per face, for wireframe mode
    pub fn wireframe_indices(&self) -> Vec<u32> {
        self.indices
            .chunks_exact(3)
            .flat_map(|t| [t[0], t[1], t[1], t[2], t[2], t[0]])
            .collect()
    }
}

/// Point overlay vertices
pub fn point_vertices(points: &[Point3f]) -> Vec<PointVertex> {
    points
        .iter()
        .map(|p| PointVertex {
            position: [p.x, p.y, p.z],
        })
        .collect()
}
