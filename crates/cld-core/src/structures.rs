/// Causal statements as they appear in a decoded response document.
///
/// Two historical document shapes exist:
///
/// - the flat shape, a list of [`Relationship`] values each naming both
///   endpoints;
/// - the chains shape, a list of [`CausalChain`] values each naming an
///   initial variable followed by a sequence of [`RelationshipEntry`] hops.
///
/// Both shapes are adapted into borrowed [`CausalEdge`] views so that
/// everything downstream (variable sets, the edge list, cycle search, DOT
/// output) is independent of the shape that supplied the data. Variable names
/// are kept exactly as written; normalisation happens when a view is derived.
use serde::{Deserialize, Serialize};

use crate::polarity::Polarity;

/// A single directed influence `from -> to` in the flat document shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Relationship {
    /// The cause.
    pub from: String,
    /// The effect.
    pub to: String,
    /// Whether the effect moves with (`+`) or against (`-`) the cause.
    pub polarity: Polarity,
    /// Why this relationship exists.
    #[serde(default)]
    pub reasoning: String,
    /// Why this polarity was chosen.
    #[serde(default, rename = "polarityReasoning")]
    pub polarity_reasoning: String,
}

impl Relationship {
    /// Builds a relationship with empty reasoning text.
    pub fn new(from: impl Into<String>, to: impl Into<String>, polarity: Polarity) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            polarity,
            reasoning: String::new(),
            polarity_reasoning: String::new(),
        }
    }

    /// Returns the borrowed edge view of this relationship.
    pub fn edge(&self) -> CausalEdge<'_> {
        CausalEdge {
            from: &self.from,
            to: &self.to,
            polarity: self.polarity,
        }
    }
}

/// One hop of a [`CausalChain`]: the variable reached and the polarity of the
/// influence arriving at it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelationshipEntry {
    /// The variable affected by the previous link of the chain.
    pub variable: String,
    /// Polarity of the influence from the previous variable onto this one.
    pub polarity: Polarity,
    /// Why this polarity was chosen.
    #[serde(default)]
    pub polarity_reasoning: String,
}

/// A multi-hop causal chain in the chains document shape.
///
/// A chain with *n* entries yields *n* edges: `initial_variable -> entry 0`,
/// then `entry i-1 -> entry i` for every later entry. A chain with no entries
/// yields no edges and contributes no variables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CausalChain {
    /// The variable the chain starts from.
    pub initial_variable: String,
    /// The ordered hops of the chain.
    pub relationships: Vec<RelationshipEntry>,
    /// Why the chain exists.
    #[serde(default)]
    pub reasoning: String,
}

impl CausalChain {
    /// Returns the edges of this chain in hop order.
    pub fn edges(&self) -> impl Iterator<Item = CausalEdge<'_>> {
        let sources = std::iter::once(self.initial_variable.as_str())
            .chain(self.relationships.iter().map(|e| e.variable.as_str()));
        sources
            .zip(self.relationships.iter())
            .map(|(from, entry)| CausalEdge {
                from,
                to: &entry.variable,
                polarity: entry.polarity,
            })
    }
}

impl From<Relationship> for CausalChain {
    /// Turns a flat relationship into a single-hop chain. The relationship's
    /// reasoning moves to the chain; its polarity reasoning stays on the hop.
    fn from(r: Relationship) -> Self {
        Self {
            initial_variable: r.from,
            relationships: vec![RelationshipEntry {
                variable: r.to,
                polarity: r.polarity,
                polarity_reasoning: r.polarity_reasoning,
            }],
            reasoning: r.reasoning,
        }
    }
}

/// A borrowed, shape-independent view of one causal influence.
///
/// Endpoint names are the raw document spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CausalEdge<'a> {
    /// Raw name of the cause.
    pub from: &'a str,
    /// Raw name of the effect.
    pub to: &'a str,
    /// Polarity of the influence.
    pub polarity: Polarity,
}
