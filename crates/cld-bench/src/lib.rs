//! Causal map generator and benchmark utilities.
//!
//! Generation is deterministic for a given [`GeneratorConfig`]: a seeded
//! `StdRng` drives every choice, so benchmarks and tests see the same map for
//! the same seed.
//!
//! A generated map has two layers:
//! - a forward backbone of influences that only point from lower to higher
//!   variable indices and therefore never closes a loop;
//! - `num_rings` injected rings over randomly chosen distinct variables,
//!   each emitted as one multi-hop causal chain in the chains shape.
//!
//! Variable spellings vary in case and padding between occurrences so that
//! normalisation is on the hot path.

use cld_core::{CausalChain, Influences, Map, Polarity, Relationship, RelationshipEntry, Shape};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

/// Configuration for the map generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator.
    pub seed: u64,
    /// Number of distinct variables.
    pub num_variables: usize,
    /// Number of backbone influences.
    pub num_edges: usize,
    /// Number of injected rings.
    pub num_rings: usize,
    /// Shortest injected ring, in variables (at least 1).
    pub min_ring_length: usize,
    /// Longest injected ring, in variables.
    pub max_ring_length: usize,
    /// Probability that an influence is negative.
    pub negative_fraction: f64,
    /// Document shape of the generated map.
    pub shape: Shape,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 50 variables, 80 backbone influences, 5 rings.
    Small,
    /// 500 variables, 1200 backbone influences, 25 rings.
    Medium,
    /// 2000 variables, 5000 backbone influences, 60 rings.
    Large,
}

impl SizeTier {
    /// Returns the default configuration for this tier in the chains shape.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let (num_variables, num_edges, num_rings, max_ring_length) = match self {
            SizeTier::Small => (50, 80, 5, 6),
            SizeTier::Medium => (500, 1200, 25, 10),
            SizeTier::Large => (2000, 5000, 60, 16),
        };
        GeneratorConfig {
            seed,
            num_variables,
            num_edges,
            num_rings,
            min_ring_length: 2,
            max_ring_length,
            negative_fraction: 0.3,
            shape: Shape::CausalChains,
        }
    }
}

const ROOTS: &[&str] = &[
    "pressure", "demand", "supply", "trust", "capacity", "backlog", "morale", "price",
    "inventory", "workload", "quality", "revenue", "churn", "adoption", "fatigue", "budget",
];

/// Canonical (normalised) name of variable `i`.
pub fn variable_name(i: usize) -> String {
    format!("{} {}", ROOTS[i % ROOTS.len()], i / ROOTS.len())
}

/// One occurrence of variable `i` with a random but equivalent spelling.
fn spell(rng: &mut StdRng, i: usize) -> String {
    let name = variable_name(i);
    match rng.gen_range(0..4) {
        0 => name.to_uppercase(),
        1 => format!(" {name} "),
        2 => {
            let mut chars = name.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        }
        _ => name,
    }
}

fn polarity(rng: &mut StdRng, negative_fraction: f64) -> Polarity {
    if rng.gen_bool(negative_fraction.clamp(0.0, 1.0)) {
        Polarity::Negative
    } else {
        Polarity::Positive
    }
}

/// Generates a map according to `config`.
pub fn generate_map(config: &GeneratorConfig) -> Map {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = config.num_variables.max(2);

    let mut backbone = Vec::with_capacity(config.num_edges);
    for _ in 0..config.num_edges {
        let a = rng.gen_range(0..n - 1);
        let b = rng.gen_range(a + 1..n);
        backbone.push(Relationship::new(
            spell(&mut rng, a),
            spell(&mut rng, b),
            polarity(&mut rng, config.negative_fraction),
        ));
    }

    let mut rings: Vec<CausalChain> = Vec::with_capacity(config.num_rings);
    let min_len = config.min_ring_length.clamp(1, n);
    let max_len = config.max_ring_length.clamp(min_len, n);
    for _ in 0..config.num_rings {
        let len = rng.gen_range(min_len..=max_len);
        let members = index::sample(&mut rng, n, len).into_vec();
        let mut relationships = Vec::with_capacity(len);
        for &m in members.iter().skip(1).chain(members.first()) {
            relationships.push(RelationshipEntry {
                variable: spell(&mut rng, m),
                polarity: polarity(&mut rng, config.negative_fraction),
                polarity_reasoning: String::new(),
            });
        }
        rings.push(CausalChain {
            initial_variable: spell(&mut rng, members[0]),
            relationships,
            reasoning: String::new(),
        });
    }

    let influences = match config.shape {
        Shape::CausalChains => {
            let mut chains: Vec<CausalChain> =
                backbone.into_iter().map(CausalChain::from).collect();
            chains.extend(rings);
            Influences::Chains(chains)
        }
        Shape::Relationships => {
            let mut flat = backbone;
            for ring in &rings {
                flat.extend(ring.edges().map(|e| Relationship::new(e.from, e.to, e.polarity)));
            }
            Influences::Relationships(flat)
        }
    };

    Map::new(
        format!("Generated map (seed {})", config.seed),
        "Randomly generated causal map for benchmarking.",
        influences,
    )
}

/// Generates a map and serialises it as a response document.
///
/// # Errors
///
/// Returns the serialisation error, which cannot occur for generated maps in
/// practice.
pub fn generate_document(config: &GeneratorConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string(&generate_map(config))
}
