//! Implementation of `cld loops <file>`.
//!
//! Human mode prints one closed loop per line (`a -> b -> a`), shortest
//! first. JSON mode prints an array of closed variable sequences. A map
//! without loops prints nothing (or `[]`) and still exits 0.
use std::io::Write;

use cld_core::Map;

use crate::OutputFormat;
use crate::cmd::{finish_stdout, write_json};
use crate::error::CliError;

/// Runs the `loops` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if stdout cannot be written.
pub fn run(map: &Map, format: &OutputFormat) -> Result<(), CliError> {
    let loops = map.loops();
    tracing::info!(loops = loops.len(), "found feedback loops");

    match format {
        OutputFormat::Json => write_json(&loops),
        OutputFormat::Human => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            finish_stdout(loops.iter().try_for_each(|l| writeln!(out, "{l}")))
        }
    }
}
