//! Structured output helpers.

use serde::Serialize;

use crate::OutputFormat;

/// Print a serializable value as pretty JSON unless quiet.
///
/// Text output is written by each command itself.
pub fn print_json<T: Serialize>(value: &T, quiet: bool) {
    if quiet {
        return;
    }
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

pub fn is_json(format: OutputFormat) -> bool {
    format == OutputFormat::Json
}
