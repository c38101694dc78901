//! Subcommand implementations and the options they share.

pub mod export;
pub mod info;
pub mod last;
pub mod shader;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use surfview_io::Session;
use surfview_reconstruction::{PipelineConfig, UpAxis};

use crate::Cli;

/// Pipeline overrides accepted by commands that build a surface
#[derive(Args, Debug, Default)]
pub struct PipelineArgs {
    /// Vertex welding tolerance
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Which scene axis heights map to
    #[arg(long)]
    pub up: Option<UpArg>,

    /// Skip vertex normal generation
    #[arg(long)]
    pub no_normals: bool,

    /// Keep original coordinates instead of centering the surface
    #[arg(long)]
    pub no_center: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum UpArg {
    Y,
    Z,
}

impl From<UpArg> for UpAxis {
    fn from(arg: UpArg) -> Self {
        match arg {
            UpArg::Y => UpAxis::Y,
            UpArg::Z => UpAxis::Z,
        }
    }
}

impl PipelineArgs {
    /// Apply the flags on top of `config`
    pub fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(up) = self.up {
            config.up_axis = up.into();
        }
        if self.no_normals {
            config.compute_normals = false;
        }
        if self.no_center {
            config.center = false;
        }
        config
    }
}

/// Pipeline settings from `--config` (or defaults) with flag overrides
pub fn pipeline_config(cli: &Cli, args: &PipelineArgs) -> Result<PipelineConfig> {
    let base = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load pipeline config from {:?}", path))?,
        None => PipelineConfig::default(),
    };
    Ok(args.apply(base))
}

pub fn session(cli: &Cli) -> Session {
    cli.session
        .as_ref()
        .map(Session::new)
        .unwrap_or_default()
}
