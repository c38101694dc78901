//! Wavefront OBJ export

use crate::MeshWriter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use surfview_core::{Error, IndexedMesh, Result, COLOR};

pub struct ObjWriter;

impl ObjWriter {
    /// Write `mesh` as OBJ text to any writer.
    ///
    /// Emits one `v` line per vertex, one `vn` line per vertex when the mesh
    /// has normals, and 1-based `f` lines. Non-indexed meshes are written
    /// with implicit `0..n` indices. An RGB `color` attribute is appended to
    /// the `v` lines.
    pub fn write_to<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> Result<()> {
        if mesh.position_attribute().is_none() && !mesh.is_empty() {
            return Err(Error::InvalidData("Mesh has no position attribute".to_string()));
        }

        let positions = mesh.positions();
        let normals = mesh.normals();
        let colors = mesh.attributes.get(COLOR).filter(|c| c.item_size() >= 3);

        writeln!(writer, "# surfview")?;
        writeln!(writer, "# vertices: {}, faces: {}", positions.len(), mesh.face_count())?;

        for (i, p) in positions.iter().enumerate() {
            match colors {
                Some(colors) => {
                    let c = colors.item(i);
                    writeln!(writer, "v {} {} {} {} {} {}", p.x, p.y, p.z, c[0], c[1], c[2])?;
                }
                None => writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?,
            }
        }
        if let Some(normals) = &normals {
            for n in normals {
                writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
            }
        }

        for [a, b, c] in mesh.faces() {
            let (a, b, c) = (a + 1, b + 1, c + 1);
            if normals.is_some() {
                writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
            } else {
                writeln!(writer, "f {a} {b} {c}")?;
            }
        }

        Ok(())
    }
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(mesh, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfview_core::{Point3f, VertexAttribute, NORMAL};

    fn triangle() -> IndexedMesh {
        IndexedMesh::soup_from_positions(&[
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.5, 1.0, 0.0),
        ])
    }

    fn render(mesh: &IndexedMesh) -> String {
        let mut out = Vec::new();
        ObjWriter::write_to(mesh, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_soup_without_normals() {
        let text = render(&triangle());
        let lines: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(lines, vec!["v 0 0 0", "v 1 0 0", "v 0.5 1 0", "f 1 2 3"]);
    }

    #[test]
    fn test_indexed_with_normals() {
        let mut mesh = triangle().merge_vertices(1e-4);
        let up = surfview_core::Vector3f::new(0.0, 0.0, 1.0);
        mesh.set_attribute(NORMAL, VertexAttribute::from_vectors(&[up, up, up]))
            .unwrap();

        let text = render(&mesh);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 3);
        assert!(text.lines().any(|l| l == "f 1//1 2//2 3//3"));
    }

    #[test]
    fn test_vertex_colors() {
        let mut mesh = triangle();
        let colors = VertexAttribute::new(vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0], 3).unwrap();
        mesh.set_attribute(COLOR, colors).unwrap();

        let text = render(&mesh);
        assert!(text.lines().any(|l| l == "v 1 0 0 0 1 0"));
    }

    #[test]
    fn test_write_to_file() {
        let path = std::env::temp_dir().join(format!("surfview_obj_{}.obj", std::process::id()));
        ObjWriter::write_mesh(&triangle(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("f 1 2 3"));

        let _ = std::fs::remove_file(&path);
    }
}
