//! surfview last command - show the remembered dataset.

use anyhow::{Context, Result};
use serde::Serialize;

use super::session;
use crate::{output, Cli};

#[derive(Serialize)]
struct LastOpened {
    path: Option<String>,
}

pub fn run(cli: &Cli) -> Result<()> {
    let session = session(cli);
    let last = session
        .last_opened()
        .with_context(|| format!("Failed to read session file {:?}", session.path()))?;

    if output::is_json(cli.format) {
        let value = LastOpened {
            path: last.map(|p| p.display().to_string()),
        };
        output::print_json(&value, cli.quiet);
    } else if !cli.quiet {
        match last {
            Some(path) => println!("{}", path.display()),
            None => println!("No dataset opened yet"),
        }
    }

    Ok(())
}
