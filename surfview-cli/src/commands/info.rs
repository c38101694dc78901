//! surfview info command - build a surface and report its statistics.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use surfview_reconstruction::{load_surface, SurfaceStats};
use surfview_visualization::RenderBuffers;
use tracing::debug;

use super::{pipeline_config, session, PipelineArgs};
use crate::{output, Cli};

#[derive(Serialize)]
struct SurfaceInfo {
    path: String,
    #[serde(flatten)]
    stats: SurfaceStats,
    offset: [f32; 3],
    vertex_buffer_bytes: usize,
    index_buffer_bytes: usize,
}

pub fn run(input: &Path, args: &PipelineArgs, cli: &Cli) -> Result<()> {
    let config = pipeline_config(cli, args)?;
    debug!("Pipeline config: {:?}", config);

    let model = load_surface(input, &config)
        .with_context(|| format!("Failed to build surface from {:?}", input))?;
    let buffers = RenderBuffers::from_mesh(&model.mesh).context("Failed to build render buffers")?;

    session(cli)
        .remember(input)
        .context("Failed to update the session file")?;

    let info = SurfaceInfo {
        path: input.display().to_string(),
        stats: model.stats(),
        offset: [model.offset.x, model.offset.y, model.offset.z],
        vertex_buffer_bytes: buffers.vertex_bytes().len(),
        index_buffer_bytes: buffers.index_bytes().len(),
    };

    if output::is_json(cli.format) {
        output::print_json(&info, cli.quiet);
        return Ok(());
    }
    if cli.quiet {
        return Ok(());
    }

    let s = &info.stats;
    println!("Surface Information");
    println!("  File: {}", info.path);
    println!("  Points: {}", s.points);
    println!("  Triangles: {}", s.triangles);
    println!("  Vertices: {} (soup) -> {} (welded)", s.soup_vertices, s.welded_vertices);
    println!("  Height range: {} .. {}", s.height_min, s.height_max);
    println!(
        "  Bounds: [{:.4}, {:.4}, {:.4}] - [{:.4}, {:.4}, {:.4}]",
        s.bounds_min[0], s.bounds_min[1], s.bounds_min[2], s.bounds_max[0], s.bounds_max[1], s.bounds_max[2]
    );
    println!(
        "  Offset: [{:.4}, {:.4}, {:.4}]",
        info.offset[0], info.offset[1], info.offset[2]
    );
    println!(
        "  GPU buffers: {} vertex bytes, {} index bytes",
        info.vertex_buffer_bytes, info.index_buffer_bytes
    );

    Ok(())
}
