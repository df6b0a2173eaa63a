/// Graph views derived from a [`Map`].
///
/// Two views exist, both built fresh on every call and both keyed by
/// normalised [`Variable`] names:
///
/// - [`EdgeList`]: the ordered adjacency list consumed by cycle search. It
///   keeps multi-edges and fixes the traversal order (roots ascending,
///   successors in document order), which is what makes loop discovery
///   reproducible.
/// - [`CausalGraph`]: a `petgraph` [`StableDiGraph`] carrying polarity on
///   each edge, used for summaries and DOT rendering.
///
/// # Shape adapters
///
/// [`EdgeList::from_relationships`] and [`EdgeList::from_chains`] are the two
/// adapters from document shape to edge list. Both funnel into
/// [`EdgeList::from_edges`], so the search in [`cycles`] never sees which
/// shape supplied the data.
pub mod cycles;
pub mod dot;

pub use cycles::{FeedbackLoop, find_loops};
pub use dot::to_dot;

use std::collections::{BTreeMap, HashMap};

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::map::Map;
use crate::polarity::Polarity;
use crate::set::Set;
use crate::structures::{CausalChain, CausalEdge, Relationship};
use crate::variable::Variable;

// ---------------------------------------------------------------------------
// EdgeList
// ---------------------------------------------------------------------------

/// Normalised adjacency list: vertex → ordered destinations.
///
/// Only vertices with at least one outgoing edge appear as keys. Destination
/// lists are not deduplicated; two relationships asserting the same influence
/// produce two entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    outgoing: BTreeMap<Variable, Vec<Variable>>,
}

impl EdgeList {
    /// Builds an edge list from raw edges, normalising both endpoints.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = CausalEdge<'a>>) -> Self {
        let mut outgoing: BTreeMap<Variable, Vec<Variable>> = BTreeMap::new();
        for edge in edges {
            outgoing
                .entry(Variable::new(edge.from))
                .or_default()
                .push(Variable::new(edge.to));
        }
        Self { outgoing }
    }

    /// Adapter for the flat document shape.
    pub fn from_relationships(relationships: &[Relationship]) -> Self {
        Self::from_edges(relationships.iter().map(Relationship::edge))
    }

    /// Adapter for the chains document shape.
    pub fn from_chains(chains: &[CausalChain]) -> Self {
        Self::from_edges(chains.iter().flat_map(CausalChain::edges))
    }

    /// Returns the vertices with outgoing edges, in ascending order.
    pub fn roots(&self) -> impl Iterator<Item = &Variable> {
        self.outgoing.keys()
    }

    /// Returns the destinations of `from` in insertion order, or an empty
    /// slice when `from` has no outgoing edges.
    pub fn successors(&self, from: &Variable) -> &[Variable] {
        self.outgoing.get(from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns every vertex that appears as a source or destination.
    pub fn variables(&self) -> Set<Variable> {
        self.outgoing
            .iter()
            .flat_map(|(from, tos)| std::iter::once(from).chain(tos))
            .cloned()
            .collect()
    }

    /// Returns the number of vertices with outgoing edges.
    pub fn root_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Returns the total number of edges, counting repeats.
    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }
}

// ---------------------------------------------------------------------------
// CausalGraph
// ---------------------------------------------------------------------------

/// A directed multigraph of normalised variables with polarity-weighted edges.
///
/// Node indices are assigned in order of first appearance in the document, so
/// the same map always produces the same indices. Construct with
/// [`build_graph`] or [`Map::causal_graph`].
#[derive(Debug, Clone)]
pub struct CausalGraph {
    graph: StableDiGraph<Variable, Polarity>,
    id_to_index: HashMap<Variable, NodeIndex>,
}

impl CausalGraph {
    /// Returns the number of variables.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of influences, counting repeats.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Looks up the node index for a variable name. The name is normalised
    /// before lookup.
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.id_to_index.get(&Variable::new(name)).copied()
    }

    /// Returns the number of outgoing influences of `name`, or `None` if the
    /// variable is not in the graph.
    pub fn out_degree(&self, name: &str) -> Option<usize> {
        let idx = self.node_index(name)?;
        Some(self.graph.edges_directed(idx, Direction::Outgoing).count())
    }

    /// Returns the number of incoming influences of `name`, or `None` if the
    /// variable is not in the graph.
    pub fn in_degree(&self, name: &str) -> Option<usize> {
        let idx = self.node_index(name)?;
        Some(self.graph.edges_directed(idx, Direction::Incoming).count())
    }

    /// Returns the number of influences with the given polarity.
    pub fn polarity_count(&self, polarity: Polarity) -> usize {
        self.graph
            .edge_weights()
            .filter(|&&p| p == polarity)
            .count()
    }

    /// Returns the underlying petgraph graph.
    pub fn graph(&self) -> &StableDiGraph<Variable, Polarity> {
        &self.graph
    }
}

/// Builds a [`CausalGraph`] from every edge of `map`.
///
/// Each distinct normalised name becomes one node; each edge becomes one
/// petgraph edge, so repeated influences stay parallel.
pub fn build_graph(map: &Map) -> CausalGraph {
    let mut graph: StableDiGraph<Variable, Polarity> = StableDiGraph::new();
    let mut id_to_index: HashMap<Variable, NodeIndex> = HashMap::new();

    let mut intern = |graph: &mut StableDiGraph<Variable, Polarity>, raw: &str| -> NodeIndex {
        let var = Variable::new(raw);
        *id_to_index
            .entry(var.clone())
            .or_insert_with(|| graph.add_node(var))
    };

    for edge in map.edges() {
        let from = intern(&mut graph, edge.from);
        let to = intern(&mut graph, edge.to);
        graph.add_edge(from, to, edge.polarity);
    }

    tracing::trace!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built causal graph"
    );

    CausalGraph { graph, id_to_index }
}
