//! surfview shader command - print the composed surface shader.

use anyhow::Result;
use serde::Serialize;
use surfview_visualization::{compose_shader, shader_cache_key, ShadingMode};

use crate::{output, Cli};

#[derive(Serialize)]
struct ShaderSource {
    key: String,
    source: String,
}

pub fn run(mode: ShadingMode, cli: &Cli) -> Result<()> {
    if output::is_json(cli.format) {
        let value = ShaderSource {
            key: shader_cache_key(mode),
            source: compose_shader(mode),
        };
        output::print_json(&value, cli.quiet);
    } else if !cli.quiet {
        print!("{}", compose_shader(mode));
    }

    Ok(())
}
