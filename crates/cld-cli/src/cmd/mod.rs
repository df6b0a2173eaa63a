/// Subcommand implementations for the `cld` CLI.
///
/// Each submodule exposes a `run` function that writes to stdout and returns
/// `Ok(())` or a [`CliError`]. [`load_map`] is the shared front half of every
/// subcommand that takes a `FILE`.
pub mod dot;
pub mod inspect;
pub mod loops;
pub mod schema;
pub mod variables;

use std::io::{ErrorKind, Write};

use cld_core::{Map, decode_completion, parse_map};

use crate::error::CliError;
use crate::io::read_input;
use crate::{Cli, PathOrStdin};

/// Reads `source` and decodes it as a bare response document, or as a
/// chat-completion body when `--completion` is set.
///
/// # Errors
///
/// Returns any [`read_input`] error, or [`CliError::DecodeFailed`].
pub fn load_map(source: &PathOrStdin, cli: &Cli) -> Result<Map, CliError> {
    let content = read_input(source, cli.max_file_size)?;
    let decoded = if cli.completion {
        decode_completion(content.as_bytes())
    } else {
        parse_map(&content)
    };
    let map = decoded.map_err(|e| CliError::decode(source.label(), e))?;

    tracing::info!(
        source = %source.label(),
        shape = map.shape().key(),
        title = map.title(),
        "loaded map"
    );
    Ok(map)
}

/// Writes `text` to stdout, followed by a newline unless it already ends in
/// one.
pub(crate) fn write_stdout(text: &str) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = if text.ends_with('\n') {
        out.write_all(text.as_bytes())
    } else {
        writeln!(out, "{text}")
    };
    finish_stdout(result)
}

/// Renders `value` as pretty JSON and writes it to stdout.
pub(crate) fn write_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })?;
    write_stdout(&json)
}

/// Maps the outcome of writing to stdout. A reader that went away early
/// (`cld loops map.json | head`) is not an error.
pub(crate) fn finish_stdout(result: std::io::Result<()>) -> Result<(), CliError> {
    match result {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed by reader");
            Ok(())
        }
        Err(e) => Err(CliError::IoError {
            source: "stdout".to_owned(),
            detail: e.to_string(),
        }),
        Ok(()) => Ok(()),
    }
}
