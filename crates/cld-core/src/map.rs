/// The causal map: root aggregate of the causal loop diagram engine.
///
/// A [`Map`] is built once, either by decoding a response document (see
/// [`crate::decode`]) or from a list of relationships via
/// [`Map::from_relationships`], and is never mutated afterwards. Every derived
/// view ([`Map::variables`], [`Map::edge_list`], [`Map::loops`],
/// [`Map::causal_graph`]) is recomputed on each call from the immutable
/// fields and allocates its own working state, so a shared `&Map` can be
/// queried from several threads at once.
///
/// # Document shapes
///
/// The influences of a map come from exactly one of two document shapes,
/// captured by [`Influences`]. Decoding goes through [`MapDocument`], which
/// accepts either top-level key and rejects documents carrying both or
/// neither.
use serde::{Deserialize, Serialize};

use crate::graph::cycles::{FeedbackLoop, find_loops};
use crate::graph::{CausalGraph, EdgeList, build_graph};
use crate::set::Set;
use crate::structures::{CausalChain, CausalEdge, Relationship};
use crate::variable::Variable;

/// Which document shape supplied a map's influences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Flat `relationships` list.
    Relationships,
    /// Nested `causal_chains` list.
    CausalChains,
}

impl Shape {
    /// Returns the top-level document key that carries influences in this
    /// shape.
    pub fn key(self) -> &'static str {
        match self {
            Self::Relationships => "relationships",
            Self::CausalChains => "causal_chains",
        }
    }
}

/// The influences carried by a map, in exactly one document shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Influences {
    /// Flat relationship list.
    Relationships(Vec<Relationship>),
    /// Causal chain list.
    Chains(Vec<CausalChain>),
}

impl Influences {
    /// Returns the shape these influences were expressed in.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Relationships(_) => Shape::Relationships,
            Self::Chains(_) => Shape::CausalChains,
        }
    }
}

/// Shape violations found while turning a [`MapDocument`] into a [`Map`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// The document carries both `relationships` and `causal_chains`.
    #[error("document has both `relationships` and `causal_chains`")]
    Ambiguous,
    /// The document carries neither `relationships` nor `causal_chains`.
    #[error("document has neither `relationships` nor `causal_chains`")]
    Missing,
}

/// Wire representation of a map, covering both document shapes.
///
/// Prose fields default to empty when absent; the influence lists are
/// optional here and the one-of constraint is enforced by the conversion into
/// [`Map`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapDocument {
    /// Short descriptive title.
    #[serde(default)]
    pub title: String,
    /// Plain-language explanation of the diagram.
    #[serde(default)]
    pub explanation: String,
    /// Flat-shape influences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,
    /// Chains-shape influences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub causal_chains: Option<Vec<CausalChain>>,
}

/// An immutable causal loop diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MapDocument", into = "MapDocument")]
pub struct Map {
    title: String,
    explanation: String,
    influences: Influences,
}

impl Map {
    /// Creates a map from already-shaped influences.
    pub fn new(
        title: impl Into<String>,
        explanation: impl Into<String>,
        influences: Influences,
    ) -> Self {
        Self {
            title: title.into(),
            explanation: explanation.into(),
            influences,
        }
    }

    /// Creates a chain-based map with one single-hop chain per relationship.
    ///
    /// Used by callers that assemble relationships programmatically, such as
    /// deterministic fixtures. The result has the same edges, variables and
    /// loops as a flat map holding `relationships` in the same order.
    pub fn from_relationships(
        title: impl Into<String>,
        explanation: impl Into<String>,
        relationships: Vec<Relationship>,
    ) -> Self {
        let chains = relationships.into_iter().map(CausalChain::from).collect();
        Self::new(title, explanation, Influences::Chains(chains))
    }

    /// Returns the map title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the map explanation.
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Returns the influences as supplied.
    pub fn influences(&self) -> &Influences {
        &self.influences
    }

    /// Returns the document shape the influences came from.
    pub fn shape(&self) -> Shape {
        self.influences.shape()
    }

    /// Returns every influence as a borrowed edge, in document order.
    ///
    /// Chains contribute their hops in order, chain after chain.
    pub fn edges(&self) -> impl Iterator<Item = CausalEdge<'_>> {
        let (flat, chained) = match &self.influences {
            Influences::Relationships(rs) => (Some(rs.iter().map(Relationship::edge)), None),
            Influences::Chains(cs) => (None, Some(cs.iter().flat_map(CausalChain::edges))),
        };
        flat.into_iter()
            .flatten()
            .chain(chained.into_iter().flatten())
    }

    /// Returns the set of normalised variables appearing as an edge endpoint.
    pub fn variables(&self) -> Set<Variable> {
        self.edges()
            .flat_map(|e| [e.from, e.to])
            .map(Variable::new)
            .collect()
    }

    /// Builds the normalised adjacency list consumed by cycle search.
    pub fn edge_list(&self) -> EdgeList {
        match &self.influences {
            Influences::Relationships(rs) => EdgeList::from_relationships(rs),
            Influences::Chains(cs) => EdgeList::from_chains(cs),
        }
    }

    /// Returns every distinct feedback loop, closed and sorted.
    ///
    /// See [`crate::graph::cycles`] for the search, canonicalisation and
    /// ordering rules.
    pub fn loops(&self) -> Vec<FeedbackLoop> {
        find_loops(&self.edge_list())
    }

    /// Builds the petgraph-backed view used for summaries and DOT output.
    pub fn causal_graph(&self) -> CausalGraph {
        build_graph(self)
    }

    /// Renders the map as Graphviz DOT text.
    pub fn to_dot(&self) -> String {
        crate::graph::dot::to_dot(&self.causal_graph())
    }
}

impl TryFrom<MapDocument> for Map {
    type Error = ShapeError;

    fn try_from(doc: MapDocument) -> Result<Self, Self::Error> {
        let influences = match (doc.relationships, doc.causal_chains) {
            (Some(rs), None) => Influences::Relationships(rs),
            (None, Some(cs)) => Influences::Chains(cs),
            (Some(_), Some(_)) => return Err(ShapeError::Ambiguous),
            (None, None) => return Err(ShapeError::Missing),
        };
        Ok(Self {
            title: doc.title,
            explanation: doc.explanation,
            influences,
        })
    }
}

impl From<Map> for MapDocument {
    fn from(map: Map) -> Self {
        let (relationships, causal_chains) = match map.influences {
            Influences::Relationships(rs) => (Some(rs), None),
            Influences::Chains(cs) => (None, Some(cs)),
        };
        Self {
            title: map.title,
            explanation: map.explanation,
            relationships,
            causal_chains,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::polarity::Polarity;
    use crate::test_helpers::{american_revolution, rel};

    #[test]
    fn variables_are_normalised_endpoints() {
        let vars = american_revolution().variables();
        let expected: Set<Variable> = ["Tax Burden", "Resistance", "Clashes", "Tensions"]
            .into_iter()
            .map(Variable::new)
            .collect();
        assert_eq!(vars, expected);
        assert_eq!(
            vars.slice(),
            vec!["clashes", "resistance", "tax burden", "tensions"]
        );
    }

    #[test]
    fn spelling_variants_collapse() {
        let map = Map::new(
            "",
            "",
            Influences::Relationships(vec![
                rel("Stress Levels", "Road Rage"),
                rel(" stress levels", "ROAD RAGE "),
            ]),
        );
        assert_eq!(map.variables().len(), 2);
    }

    #[test]
    fn from_relationships_builds_chains() {
        let map = Map::from_relationships("t", "e", vec![rel("A", "B"), rel("B", "C")]);
        assert_eq!(map.shape(), Shape::CausalChains);
        let Influences::Chains(chains) = map.influences() else {
            unreachable!("from_relationships always yields chains");
        };
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[1].initial_variable, "B");
    }

    #[test]
    fn both_shapes_yield_identical_views() {
        let rs = vec![rel("A", "B"), rel("B", "A"), rel("B", "C")];
        let flat = Map::new("", "", Influences::Relationships(rs.clone()));
        let chained = Map::from_relationships("", "", rs);
        assert_eq!(flat.variables(), chained.variables());
        assert_eq!(flat.edge_list(), chained.edge_list());
        assert_eq!(flat.loops(), chained.loops());
    }

    #[test]
    fn edges_follow_document_order() {
        let map = Map::from_relationships("", "", vec![rel("x", "y"), rel("y", "z")]);
        let pairs: Vec<(&str, &str)> = map.edges().map(|e| (e.from, e.to)).collect();
        assert_eq!(pairs, vec![("x", "y"), ("y", "z")]);
    }

    #[test]
    fn empty_map_has_no_variables_or_loops() {
        let map = Map::new("", "", Influences::Chains(Vec::new()));
        assert!(map.variables().is_empty());
        assert!(map.loops().is_empty());
    }

    #[test]
    fn blank_endpoint_is_a_literal_vertex() {
        let map = Map::new("", "", Influences::Relationships(vec![rel("", "A")]));
        let vars = map.variables();
        assert!(vars.contains(""));
        assert!(vars.contains("a"));
    }

    #[test]
    fn document_with_both_shapes_is_rejected() {
        let doc = MapDocument {
            relationships: Some(Vec::new()),
            causal_chains: Some(Vec::new()),
            ..MapDocument::default()
        };
        assert_eq!(Map::try_from(doc), Err(ShapeError::Ambiguous));
    }

    #[test]
    fn document_with_neither_shape_is_rejected() {
        assert_eq!(
            Map::try_from(MapDocument::default()),
            Err(ShapeError::Missing)
        );
    }

    #[test]
    fn serializes_only_the_present_shape() {
        let map = Map::from_relationships(
            "Title",
            "Why",
            vec![Relationship::new("A", "B", Polarity::Negative)],
        );
        let value = serde_json::to_value(&map).expect("serialize");
        assert!(value.get("causal_chains").is_some());
        assert!(value.get("relationships").is_none());
        let back: Map = serde_json::from_value(value).expect("parse");
        assert_eq!(back, map);
    }
}
