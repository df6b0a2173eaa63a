//! Implementation of `cld schema [--shape chains|relationships]`.
//!
//! Prints the JSON Schema for one response shape, or with
//! `--response-format` the named strict envelope a chat-completion request
//! carries. Output is always JSON.
use cld_core::{ResponseFormat, Shape, response_schema};

use crate::ShapeArg;
use crate::cmd::write_json;
use crate::error::CliError;

/// Runs the `schema` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if stdout cannot be written.
pub fn run(shape: &ShapeArg, response_format: bool) -> Result<(), CliError> {
    let shape = Shape::from(*shape);
    if response_format {
        write_json(&ResponseFormat::for_shape(shape))
    } else {
        write_json(&response_schema(shape))
    }
}
