//! Implementation of `cld dot <file>`: writes the Graphviz DOT rendering of a
//! map to stdout. Format flags do not apply.
use cld_core::Map;

use crate::cmd::write_stdout;
use crate::error::CliError;

/// Runs the `dot` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if stdout cannot be written.
pub fn run(map: &Map) -> Result<(), CliError> {
    write_stdout(&map.to_dot())
}
