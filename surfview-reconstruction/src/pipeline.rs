//! Height field surface pipeline
//!
//! Extracted points go through triangulation, soup expansion, welding and
//! normal generation to become a renderable [`SurfaceModel`].

use crate::delaunay::{triangle_soup, triangulate, UpAxis};
use serde::{Deserialize, Serialize};
use std::path::Path;
use surfview_core::{
    Drawable, Error, HeightAxis, HeightRange, IndexedMesh, Point3f, Result, Vector3f, DEFAULT_TOLERANCE,
};
use surfview_io::{read_points, ExtractedPoints};
use tracing::{debug, info};

/// Settings for [`build_surface`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Weld tolerance
    pub tolerance: f64,
    /// Add area-weighted vertex normals after welding
    pub compute_normals: bool,
    /// Record the offset that moves the bounding-box center to the origin
    pub center: bool,
    pub up_axis: UpAxis,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            compute_normals: true,
            center: true,
            up_axis: UpAxis::Y,
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidData(format!("Invalid pipeline config: {}", e)))
    }

    /// Read a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// A welded surface ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceModel {
    /// Welded mesh in scene coordinates
    pub mesh: IndexedMesh,
    /// Height bounds of the source data, used for gradient shading
    pub height_range: HeightRange,
    /// Scene axis the heights lie on
    pub height_axis: HeightAxis,
    /// Translation that centers the mesh, zero when centering is off
    pub offset: Vector3f,
    /// Source points in scene coordinates
    pub source_points: Vec<Point3f>,
    /// Vertex count of the triangle soup before welding
    pub soup_vertex_count: usize,
}

/// Summary numbers for a built surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceStats {
    pub points: usize,
    pub triangles: usize,
    pub soup_vertices: usize,
    pub welded_vertices: usize,
    pub height_min: f64,
    pub height_max: f64,
    pub bounds_min: [f32; 3],
    pub bounds_max: [f32; 3],
}

impl SurfaceModel {
    pub fn stats(&self) -> SurfaceStats {
        let (min, max) = self.mesh.bounding_box();
        SurfaceStats {
            points: self.source_points.len(),
            triangles: self.mesh.face_count(),
            soup_vertices: self.soup_vertex_count,
            welded_vertices: self.mesh.vertex_count(),
            height_min: self.height_range.min,
            height_max: self.height_range.max,
            bounds_min: [min.x, min.y, min.z],
            bounds_max: [max.x, max.y, max.z],
        }
    }
}

/// Turn extracted points into a welded, optionally normal-shaded surface
pub fn build_surface(extracted: &ExtractedPoints, config: &PipelineConfig) -> Result<SurfaceModel> {
    if extracted.height_range.is_empty() {
        return Err(Error::InvalidData("no points".to_string()));
    }

    let triangles = triangulate(&extracted.points_2d)?;
    if triangles.is_empty() {
        return Err(Error::Algorithm(
            "Triangulation produced no triangles (points may be collinear)".to_string(),
        ));
    }

    let soup = triangle_soup(&extracted.points_3d, &triangles, config.up_axis)?;
    let soup_vertex_count = soup.vertex_count();

    let mut mesh = soup.merge_vertices(config.tolerance);
    if config.compute_normals {
        mesh.compute_vertex_normals()?;
    }

    let offset = if config.center {
        -mesh.center().coords
    } else {
        Vector3f::zeros()
    };
    debug!("Surface offset {:?}", offset);

    let source_points = extracted
        .points_3d
        .iter()
        .map(|p| config.up_axis.apply(p))
        .collect();

    info!(
        "Built surface: {} triangles, {} soup vertices welded to {}",
        mesh.face_count(),
        soup_vertex_count,
        mesh.vertex_count()
    );

    Ok(SurfaceModel {
        mesh,
        height_range: extracted.height_range,
        height_axis: config.up_axis.height_axis(),
        offset,
        source_points,
        soup_vertex_count,
    })
}

/// Read a dataset from disk and build its surface
pub fn load_surface<P: AsRef<Path>>(path: P, config: &PipelineConfig) -> Result<SurfaceModel> {
    let extracted = read_points(path)?;
    build_surface(&extracted, config)
}
