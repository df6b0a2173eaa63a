//! Graphviz DOT rendering of a [`CausalGraph`].
//!
//! Produces the textual graph description handed to an external layout tool.
//! Nodes are keyed by their quoted normalised name, so an edge reads
//! `"a" -> "b" [label="+"]`. The surrounding `digraph` block carries the
//! layout attributes the rendering step expects. Running the layout tool
//! itself is the caller's job.
use crate::graph::CausalGraph;

/// Graph-level attributes emitted before the node and edge statements.
const GRAPH_ATTRIBUTES: [&str; 2] = ["overlap=false", "mode=KK"];

/// Renders `graph` as a DOT `digraph`.
///
/// Nodes appear in first-appearance order, then one edge statement per
/// influence in document order.
pub fn to_dot(graph: &CausalGraph) -> String {
    let g = graph.graph();

    let mut out = String::from("digraph {\n");
    for attr in GRAPH_ATTRIBUTES {
        out.push_str("    ");
        out.push_str(attr);
        out.push('\n');
    }
    for name in g.node_indices().filter_map(|n| g.node_weight(n)) {
        out.push_str(&format!("    {}\n", quote(name)));
    }
    for e in g.edge_indices() {
        let (Some((from, to)), Some(polarity)) = (g.edge_endpoints(e), g.edge_weight(e)) else {
            continue;
        };
        let (Some(from), Some(to)) = (g.node_weight(from), g.node_weight(to)) else {
            continue;
        };
        out.push_str(&format!(
            "    {} -> {} [label=\"{polarity}\"]\n",
            quote(from),
            quote(to)
        ));
    }
    out.push_str("}\n");
    out
}

/// Quotes `id` as a DOT string literal.
fn quote(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for c in id.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
