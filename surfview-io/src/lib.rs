//! Point data extraction and mesh export
//!
//! This crate turns JSON, plain text and CSV datasets into the point arrays
//! used by the surface pipeline, remembers the last opened dataset, and
//! writes finished meshes as Wavefront OBJ.

pub mod error;
pub mod format;
pub mod extract;
pub mod json;
pub mod plain_text;
pub mod csv;
pub mod session;
pub mod obj;

pub use error::*;
pub use format::DataFormat;
pub use extract::{extract, ExtractedPoints};
pub use json::{extract_json, extract_str};
pub use plain_text::extract_plain_text;
pub use csv::{extract_csv, CsvColumns};
pub use session::{Session, DEFAULT_SESSION_FILE};
pub use obj::ObjWriter;

use std::path::Path;
use surfview_core::{Error, IndexedMesh, Result};
use tracing::info;

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> Result<()>;
}

/// Read a dataset, choosing the format from the file extension
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<ExtractedPoints> {
    let path = path.as_ref();
    let format = DataFormat::from_path(path)?;
    let data = std::fs::read_to_string(path)?;

    let points = extract(&data, format)?;
    info!(
        "Extracted {} points from {} ({})",
        points.len(),
        path.display(),
        format
    );
    Ok(points)
}

/// Auto-detect format and write mesh
pub fn write_mesh<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("obj") => ObjWriter::write_mesh(mesh, path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}
