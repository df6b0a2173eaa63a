//! Implementation of `cld inspect <file>`.
//!
//! Prints summary statistics for a map:
//! - title and document shape
//! - variable and edge counts, edges split by polarity
//! - feedback loop count
//! - in-degree and out-degree per variable
//!
//! In `--format json` mode a single JSON object is emitted to stdout.
//! In human mode, aligned key/value lines are printed.
use std::collections::BTreeMap;
use std::io::Write;

use cld_core::{Map, Polarity};
use serde_json::json;

use crate::OutputFormat;
use crate::cmd::{finish_stdout, write_json};
use crate::error::CliError;

/// Statistics gathered from a decoded [`Map`].
#[derive(Debug, PartialEq, Eq)]
pub struct InspectStats {
    /// Map title.
    pub title: String,
    /// Top-level key the influences came from.
    pub shape: &'static str,
    /// Distinct normalised variables.
    pub variable_count: usize,
    /// Influences, counting repeats.
    pub edge_count: usize,
    /// Influences with `+` polarity.
    pub positive_count: usize,
    /// Influences with `-` polarity.
    pub negative_count: usize,
    /// Distinct feedback loops.
    pub loop_count: usize,
    /// Incoming influences per variable, keyed by normalised name.
    pub in_degrees: BTreeMap<String, usize>,
    /// Outgoing influences per variable, keyed by normalised name.
    pub out_degrees: BTreeMap<String, usize>,
}

impl InspectStats {
    /// Computes statistics from a decoded [`Map`].
    pub fn from_map(map: &Map) -> Self {
        let graph = map.causal_graph();
        let mut in_degrees = BTreeMap::new();
        let mut out_degrees = BTreeMap::new();
        for v in map.variables().into_sorted_vec() {
            in_degrees.insert(v.to_string(), graph.in_degree(&v).unwrap_or_default());
            out_degrees.insert(v.to_string(), graph.out_degree(&v).unwrap_or_default());
        }

        Self {
            title: map.title().to_owned(),
            shape: map.shape().key(),
            variable_count: graph.node_count(),
            edge_count: graph.edge_count(),
            positive_count: graph.polarity_count(Polarity::Positive),
            negative_count: graph.polarity_count(Polarity::Negative),
            loop_count: map.loops().len(),
            in_degrees,
            out_degrees,
        }
    }
}

/// Runs the `inspect` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if stdout cannot be written.
pub fn run(map: &Map, format: &OutputFormat) -> Result<(), CliError> {
    let stats = InspectStats::from_map(map);
    match format {
        OutputFormat::Human => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            finish_stdout(print_human(&mut out, &stats))
        }
        OutputFormat::Json => write_json(&json!({
            "title": stats.title,
            "shape": stats.shape,
            "variable_count": stats.variable_count,
            "edge_count": stats.edge_count,
            "positive_count": stats.positive_count,
            "negative_count": stats.negative_count,
            "loop_count": stats.loop_count,
            "in_degrees": stats.in_degrees,
            "out_degrees": stats.out_degrees,
        })),
    }
}

fn print_human<W: Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    writeln!(w, "title:      {}", stats.title)?;
    writeln!(w, "shape:      {}", stats.shape)?;
    writeln!(w, "variables:  {}", stats.variable_count)?;
    writeln!(w, "edges:      {}", stats.edge_count)?;
    writeln!(w, "  +: {}", stats.positive_count)?;
    writeln!(w, "  -: {}", stats.negative_count)?;
    writeln!(w, "loops:      {}", stats.loop_count)?;
    writeln!(w, "degree (in/out):")?;
    for (name, out) in &stats.out_degrees {
        let incoming = stats.in_degrees.get(name).copied().unwrap_or_default();
        writeln!(w, "  {name}: {incoming}/{out}")?;
    }
    Ok(())
}
