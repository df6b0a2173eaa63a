//! Implementation of `cld variables <file>`.
//!
//! Prints the distinct normalised variables of a map in ascending order: one
//! per line in human mode, a JSON array in `--format json` mode.
use std::io::Write;

use cld_core::Map;

use crate::OutputFormat;
use crate::cmd::{finish_stdout, write_json};
use crate::error::CliError;

/// Runs the `variables` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if stdout cannot be written.
pub fn run(map: &Map, format: &OutputFormat) -> Result<(), CliError> {
    let variables = map.variables();
    match format {
        OutputFormat::Json => write_json(&variables),
        OutputFormat::Human => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            finish_stdout(variables.slice().into_iter().try_for_each(|v| writeln!(out, "{v}")))
        }
    }
}
