//! Entry point for the `cld` binary.
//!
//! Parses the command line, installs the stderr log subscriber, dispatches to
//! the subcommand in [`cmd`], and turns a [`CliError`] into its message and
//! exit code.
mod cli;
mod cmd;
mod error;
mod io;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin, ShapeArg};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Installs a stderr `fmt` subscriber. `RUST_LOG` wins over the flags.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Variables { file } => {
            let map = cmd::load_map(file, cli)?;
            cmd::variables::run(&map, &cli.format)
        }
        Command::Loops { file } => {
            let map = cmd::load_map(file, cli)?;
            cmd::loops::run(&map, &cli.format)
        }
        Command::Inspect { file } => {
            let map = cmd::load_map(file, cli)?;
            cmd::inspect::run(&map, &cli.format)
        }
        Command::Dot { file } => {
            let map = cmd::load_map(file, cli)?;
            cmd::dot::run(&map)
        }
        Command::Schema {
            shape,
            response_format,
        } => cmd::schema::run(shape, *response_format),
    }
}
