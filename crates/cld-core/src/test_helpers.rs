//! Shared fixtures for unit tests inside `cld-core`.
//!
//! Integration tests under `crates/cld-core/tests/` keep their own helpers
//! because they link against the non-test build where this module is absent.

use crate::graph::FeedbackLoop;
use crate::map::{Influences, Map};
use crate::polarity::Polarity;
use crate::structures::Relationship;

/// A positive relationship with empty reasoning.
pub fn rel(from: &str, to: &str) -> Relationship {
    Relationship::new(from, to, Polarity::Positive)
}

/// The onset-of-revolution diagram: four variables, seven influences, four
/// feedback loops.
pub fn american_revolution() -> Map {
    let edges = [
        ("Tax Burden", "Tensions"),
        ("Tax Burden", "Resistance"),
        ("Tensions", "Clashes"),
        ("Resistance", "Clashes"),
        ("Clashes", "Tensions"),
        ("Clashes", "Resistance"),
        ("Tensions", "Tax Burden"),
    ];
    Map::new(
        "American Revolution Onset",
        "Based on historical context and user input.",
        Influences::Relationships(edges.iter().map(|&(f, t)| rel(f, t)).collect()),
    )
}

/// Flattens loops into plain string sequences for concise assertions.
pub fn loop_names(loops: &[FeedbackLoop]) -> Vec<Vec<&str>> {
    loops
        .iter()
        .map(|l| l.variables().iter().map(|v| v.as_str()).collect())
        .collect()
}
