//! surfview export command - write the welded surface as OBJ.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use surfview_core::{VertexAttribute, COLOR};
use surfview_reconstruction::{load_surface, SurfaceModel};
use surfview_visualization::{vertex_colors, ColorScale};
use tracing::info;

use super::{pipeline_config, session, PipelineArgs};
use crate::{output, Cli};

#[derive(Serialize)]
struct ExportResult {
    input: String,
    output: String,
    vertices: usize,
    triangles: usize,
    colors: bool,
}

pub fn run(input: &Path, output_path: &Path, colors: bool, args: &PipelineArgs, cli: &Cli) -> Result<()> {
    let config = pipeline_config(cli, args)?;

    let mut model = load_surface(input, &config)
        .with_context(|| format!("Failed to build surface from {:?}", input))?;

    if colors {
        let attribute = gradient_colors(&model)?;
        model.mesh.set_attribute(COLOR, attribute)?;
    }

    surfview_io::write_mesh(&model.mesh, output_path)
        .with_context(|| format!("Failed to write mesh to {:?}", output_path))?;
    info!("Wrote {}", output_path.display());

    session(cli)
        .remember(input)
        .context("Failed to update the session file")?;

    let result = ExportResult {
        input: input.display().to_string(),
        output: output_path.display().to_string(),
        vertices: model.mesh.vertex_count(),
        triangles: model.mesh.face_count(),
        colors,
    };

    if output::is_json(cli.format) {
        output::print_json(&result, cli.quiet);
    } else if !cli.quiet {
        println!(
            "Exported {} vertices and {} triangles to {}",
            result.vertices, result.triangles, result.output
        );
    }

    Ok(())
}

/// Terrain gradient colors of the welded vertices as an RGB attribute
fn gradient_colors(model: &SurfaceModel) -> Result<VertexAttribute> {
    let rgb = vertex_colors(
        &model.mesh,
        &model.height_range,
        model.height_axis,
        &ColorScale::terrain(),
    );
    Ok(VertexAttribute::new(rgb.into_iter().flatten().collect(), 3)?)
}
