#![deny(clippy::print_stdout, clippy::print_stderr)]

//! Causal loop diagram engine.
//!
//! Decodes model-produced causal statements into an immutable [`Map`],
//! normalises variable names, and extracts the feedback loops of the
//! resulting directed graph in a deterministic order.

pub mod decode;
pub mod graph;
pub mod map;
pub mod polarity;
pub mod schema;
pub mod set;
pub mod structures;
pub mod variable;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use decode::{
    ChatCompletionResponse, ChatMessage, Choice, DecodeError, decode_completion, parse_map,
    parse_map_slice,
};
pub use graph::{CausalGraph, EdgeList, FeedbackLoop, build_graph, find_loops, to_dot};
pub use map::{Influences, Map, MapDocument, Shape, ShapeError};
pub use polarity::Polarity;
pub use schema::{
    JsonSchema, ResponseFormat, SchemaType, causal_chains_response_schema,
    relationships_response_schema, response_schema,
};
pub use set::Set;
pub use structures::{CausalChain, CausalEdge, Relationship, RelationshipEntry};
pub use variable::{Variable, normalize};
