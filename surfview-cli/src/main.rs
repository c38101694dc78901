//! surfview: build and inspect height field surfaces from the command line.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=surfview_io=info` - Dataset loading
//! - `RUST_LOG=surfview_core=debug` - Vertex welding details
//! - `RUST_LOG=debug` - All debug output
//!
//! # Example
//!
//! ```bash
//! surfview info terrain.csv
//! surfview -v export terrain.json -o terrain.obj --colors
//! surfview last
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod output;

use commands::{export, info, last, shader, PipelineArgs};
use surfview_visualization::ShadingMode;

/// surfview - Turn x/y/z samples into a welded, shaded surface mesh.
#[derive(Parser)]
#[command(name = "surfview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Pipeline settings as JSON; command line flags take precedence
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// File remembering the last opened dataset
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the surface and print its statistics
    Info {
        /// Input dataset (.json, .txt or .csv)
        input: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Build the surface and write it as Wavefront OBJ
    Export {
        /// Input dataset (.json, .txt or .csv)
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Append height gradient colors to the vertices
        #[arg(long)]
        colors: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Print the last opened dataset
    Last,

    /// Print the WGSL surface shader
    Shader {
        /// Shading mode: gradient or plain
        #[arg(long, default_value = "gradient")]
        mode: ShadingMode,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "surfview_io=info,surfview_reconstruction=info",
            2 => "surfview_core=debug,surfview_io=debug,surfview_reconstruction=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Info { input, pipeline } => info::run(input, pipeline, &cli),
        Commands::Export {
            input,
            output,
            colors,
            pipeline,
        } => export::run(input, output, *colors, pipeline, &cli),
        Commands::Last => last::run(&cli),
        Commands::Shader { mode } => shader::run(*mode, &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
