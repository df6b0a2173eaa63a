//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use cld_core::Shape;

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// Label used in messages and logs: the path, or `-` for stdin.
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "-".to_owned(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` prints one item per line. `Json` prints a single JSON value.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default).
    Human,
    /// A single JSON value.
    Json,
}

/// Document shape selector for the `schema` subcommand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    /// `causal_chains` documents (default).
    Chains,
    /// Flat `relationships` documents.
    Relationships,
}

impl From<ShapeArg> for Shape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Chains => Shape::CausalChains,
            ShapeArg::Relationships => Shape::Relationships,
        }
    }
}

/// All top-level subcommands exposed by the `cld` binary.
#[derive(Subcommand)]
pub enum Command {
    /// List the distinct normalised variables of a map.
    Variables {
        /// Path to a response document, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// List the feedback loops of a map, shortest first.
    Loops {
        /// Path to a response document, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Print summary statistics for a map.
    Inspect {
        /// Path to a response document, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Render a map as a Graphviz DOT digraph.
    Dot {
        /// Path to a response document, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Print the JSON Schema a response document must satisfy.
    Schema {
        /// Document shape: chains (default) or relationships.
        #[arg(long, default_value = "chains", value_enum)]
        shape: ShapeArg,
        /// Wrap the schema in a named strict response-format object.
        #[arg(long)]
        response_format: bool,
    },
}

/// Root CLI struct for the `cld` binary.
///
/// Global flags are marked `global = true` so that clap propagates them to
/// every subcommand.
#[derive(Parser)]
#[command(
    name = "cld",
    version,
    about = "Causal loop diagram tool",
    long_about = "Decodes causal map documents and reports their variables,\n\
                  feedback loops, summary statistics, schemas and DOT renderings."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Only log errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log progress at info level (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input size in bytes.
    ///
    /// Can also be set via the `CLD_MAX_FILE_SIZE` environment variable.
    /// Default: 67108864 (64 MiB).
    #[arg(
        long,
        global = true,
        env = "CLD_MAX_FILE_SIZE",
        default_value = "67108864"
    )]
    pub max_file_size: u64,

    /// Treat the input as a chat-completion response body and decode the
    /// content of its first choice.
    #[arg(long, global = true)]
    pub completion: bool,
}
