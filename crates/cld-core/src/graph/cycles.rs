/// Feedback loop extraction.
///
/// Enumerates the simple cycles of an [`EdgeList`], rotates each to a
/// canonical representative, drops repeats, closes each loop and sorts the
/// result.
///
/// # Search
///
/// Every vertex with outgoing edges is used as a root, in ascending order. For
/// each root a fresh `visited` set and `path` are started and a depth-first
/// traversal runs over successors in edge-list order:
///
/// - an unvisited successor is entered (marked visited, pushed on `path`);
/// - an already-visited successor that is still on `path` closes a cycle,
///   namely the sub-path from that successor to the current vertex.
///
/// Because `visited` is not cleared when the traversal backs out of a vertex,
/// a vertex can close a cycle without being re-entered, and one root search
/// can surface several overlapping cycles. The traversal uses an explicit
/// stack of frames, so deep graphs cannot exhaust the call stack.
///
/// # Canonical form and order
///
/// A discovered cycle is rotated so that its smallest vertex comes first. Two
/// discoveries of the same cycle from different roots therefore compare equal
/// and only the first is kept; the same vertices in a different cyclic order
/// form a different loop and are both kept. Each kept cycle is closed by
/// repeating its first vertex, and the final list is stably sorted by length,
/// then lexicographically.
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::EdgeList;
use crate::set::Set;
use crate::variable::Variable;

// ---------------------------------------------------------------------------
// FeedbackLoop
// ---------------------------------------------------------------------------

/// A closed feedback loop: the first variable is repeated at the end.
///
/// Serialises as a plain JSON array of variable names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackLoop {
    variables: Vec<Variable>,
}

impl FeedbackLoop {
    /// Closes a canonical cycle by repeating its first vertex.
    fn close(mut cycle: Vec<Variable>) -> Self {
        if let Some(first) = cycle.first().cloned() {
            cycle.push(first);
        }
        Self { variables: cycle }
    }

    /// Returns the closed sequence of variables (first == last).
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Display order: shorter loops first, then lexicographic.
    fn display_order(a: &Self, b: &Self) -> Ordering {
        a.variables
            .len()
            .cmp(&b.variables.len())
            .then_with(|| a.variables.cmp(&b.variables))
    }
}

impl fmt::Display for FeedbackLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.variables.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(v)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Returns every distinct feedback loop in `edges`, closed and sorted.
///
/// Never fails: an empty or acyclic edge list yields an empty vector.
pub fn find_loops(edges: &EdgeList) -> Vec<FeedbackLoop> {
    let mut loops: Vec<FeedbackLoop> = find_cycles(edges)
        .into_iter()
        .map(FeedbackLoop::close)
        .collect();

    // Stable: equal keys keep discovery order.
    loops.sort_by(FeedbackLoop::display_order);

    tracing::debug!(loops = loops.len(), "extracted feedback loops");
    loops
}

/// Returns the distinct canonical cycles of `edges` in discovery order.
///
/// Cycles are open (the first vertex is not repeated).
pub fn find_cycles(edges: &EdgeList) -> Vec<Vec<Variable>> {
    tracing::debug!(
        roots = edges.root_count(),
        edges = edges.edge_count(),
        "searching for cycles"
    );

    let mut search = Search::new(edges);
    for root in edges.roots() {
        search.run_from(root);
    }
    search.found
}

/// Rotates `cycle` so that its smallest vertex is first, keeping the relative
/// order of the rest.
pub fn canonicalize(cycle: &[&Variable]) -> Vec<Variable> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, v)| *v)
        .map_or(0, |(i, _)| i);

    cycle[start..]
        .iter()
        .chain(&cycle[..start])
        .map(|&v| v.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Internal: depth-first search
// ---------------------------------------------------------------------------

/// One level of the explicit DFS stack.
struct Frame<'a> {
    successors: &'a [Variable],
    cursor: usize,
}

/// Working state for one [`find_cycles`] call.
struct Search<'a> {
    edges: &'a EdgeList,
    visited: Set<&'a Variable>,
    seen: HashSet<Vec<Variable>>,
    found: Vec<Vec<Variable>>,
}

impl<'a> Search<'a> {
    fn new(edges: &'a EdgeList) -> Self {
        Self {
            edges,
            visited: Set::with_capacity(edges.root_count()),
            seen: HashSet::new(),
            found: Vec::new(),
        }
    }

    /// Runs one root's traversal with a fresh `visited` set.
    fn run_from(&mut self, root: &'a Variable) {
        self.visited.clear();

        let mut path: Vec<&'a Variable> = Vec::with_capacity(32);
        let mut stack: Vec<Frame<'a>> = Vec::new();
        self.enter(root, &mut path, &mut stack);

        while let Some(frame) = stack.last_mut() {
            let Some(next) = frame.successors.get(frame.cursor) else {
                // Every successor handled: back out of this vertex. It stays
                // visited for the rest of this root's search.
                stack.pop();
                path.pop();
                continue;
            };
            frame.cursor += 1;

            if !self.visited.contains(&next) {
                // An unvisited vertex is never on the path, so entering it is
                // the only thing to do.
                self.enter(next, &mut path, &mut stack);
                continue;
            }

            if let Some(pos) = path.iter().position(|&v| v == next) {
                self.record(&path[pos..]);
            }
        }
    }

    fn enter(
        &mut self,
        v: &'a Variable,
        path: &mut Vec<&'a Variable>,
        stack: &mut Vec<Frame<'a>>,
    ) {
        self.visited.add(v);
        path.push(v);
        stack.push(Frame {
            successors: self.edges.successors(v),
            cursor: 0,
        });
    }

    /// Canonicalises `cycle` and keeps it unless already recorded.
    fn record(&mut self, cycle: &[&'a Variable]) {
        let canonical = canonicalize(cycle);
        if self.seen.contains(&canonical) {
            tracing::trace!(cycle = ?canonical, "duplicate cycle");
            return;
        }
        tracing::trace!(cycle = ?canonical, "found cycle");
        self.seen.insert(canonical.clone());
        self.found.push(canonical);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::map::{Influences, Map};
    use crate::structures::Relationship;
    use crate::test_helpers::{american_revolution, loop_names, rel};

    fn flat(pairs: &[(&str, &str)]) -> Map {
        let rs: Vec<Relationship> = pairs.iter().map(|&(f, t)| rel(f, t)).collect();
        Map::new("", "", Influences::Relationships(rs))
    }

    #[test]
    fn empty_graph_has_no_loops() {
        assert!(flat(&[]).loops().is_empty());
    }

    #[test]
    fn acyclic_graph_has_no_loops() {
        let map = flat(&[("a", "b"), ("b", "c"), ("a", "c"), ("c", "d")]);
        assert!(map.loops().is_empty());
    }

    #[test]
    fn three_cycle_is_rotated_to_smallest_vertex() {
        let map = flat(&[("B", "C"), ("C", "A"), ("A", "B")]);
        assert_eq!(loop_names(&map.loops()), vec![vec!["a", "b", "c", "a"]]);
    }

    #[test]
    fn self_loop_closes_to_pair() {
        let loops = flat(&[("V", "V")]).loops();
        assert_eq!(loop_names(&loops), vec![vec!["v", "v"]]);
    }

    #[test]
    fn regression_fixture_yields_four_loops() {
        let loops = american_revolution().loops();
        assert_eq!(
            loop_names(&loops),
            vec![
                vec!["clashes", "resistance", "clashes"],
                vec!["clashes", "tensions", "clashes"],
                vec!["tax burden", "tensions", "tax burden"],
                vec!["clashes", "tensions", "tax burden", "resistance", "clashes"],
            ]
        );
    }

    #[test]
    fn multi_edges_do_not_duplicate_loops() {
        let map = flat(&[("a", "b"), ("a", "b"), ("b", "a"), ("B", "A")]);
        assert_eq!(loop_names(&map.loops()), vec![vec!["a", "b", "a"]]);
    }

    #[test]
    fn same_vertices_in_other_order_are_distinct_cycles() {
        let el = EdgeList::default();
        let (a, b, c) = (Variable::new("a"), Variable::new("b"), Variable::new("c"));
        let mut search = Search::new(&el);
        search.record(&[&a, &b, &c]);
        search.record(&[&b, &c, &a]);
        search.record(&[&a, &c, &b]);
        assert_eq!(
            search.found,
            vec![
                vec![a.clone(), b.clone(), c.clone()],
                vec![a.clone(), c.clone(), b.clone()],
            ]
        );
    }

    #[test]
    fn visited_vertices_are_not_reentered_within_a_root() {
        // Both a->b->c->a and a->c->b->a exist, but each root search marks
        // vertices visited for its whole duration, so only the rotation
        // reached first is reported.
        let map = flat(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("a", "c"),
            ("c", "b"),
            ("b", "a"),
        ]);
        assert_eq!(
            loop_names(&map.loops()),
            vec![
                vec!["a", "b", "a"],
                vec!["a", "c", "a"],
                vec!["b", "c", "b"],
                vec!["a", "b", "c", "a"],
            ]
        );
    }

    #[test]
    fn loops_sorted_by_length_then_lexicographically() {
        let map = flat(&[
            ("x", "y"),
            ("y", "z"),
            ("z", "x"),
            ("q", "q"),
            ("m", "n"),
            ("n", "m"),
            ("b", "c"),
            ("c", "b"),
        ]);
        assert_eq!(
            loop_names(&map.loops()),
            vec![
                vec!["q", "q"],
                vec!["b", "c", "b"],
                vec!["m", "n", "m"],
                vec!["x", "y", "z", "x"],
            ]
        );
    }

    #[test]
    fn canonicalize_preserves_relative_order() {
        let (c, a, b) = (Variable::new("c"), Variable::new("a"), Variable::new("b"));
        let rotated = canonicalize(&[&c, &a, &b]);
        assert_eq!(rotated, vec![a.clone(), b.clone(), c.clone()]);
    }

    #[test]
    fn find_cycles_returns_open_cycles() {
        let map = flat(&[("a", "b"), ("b", "a")]);
        let cycles = find_cycles(&map.edge_list());
        assert_eq!(cycles, vec![vec![Variable::new("a"), Variable::new("b")]]);
    }

    #[test]
    fn loops_are_idempotent() {
        let map = american_revolution();
        assert_eq!(map.loops(), map.loops());
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let names: Vec<String> = (0..3_000).map(|i| format!("v{i:05}")).collect();
        let mut pairs: Vec<(&str, &str)> = names
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
            .collect();
        pairs.push((names[names.len() - 1].as_str(), names[0].as_str()));
        let loops = flat(&pairs).loops();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].variable_count(), 3_000);
        assert_eq!(loops[0].variables()[0], "v00000");
    }

    #[test]
    fn display_joins_with_arrows() {
        let loops = flat(&[("a", "b"), ("b", "a")]).loops();
        assert_eq!(loops[0].to_string(), "a -> b -> a");
    }

    #[test]
    fn serializes_as_plain_array() {
        let loops = flat(&[("a", "b"), ("b", "a")]).loops();
        let json = serde_json::to_string(&loops).expect("serialize");
        assert_eq!(json, r#"[["a","b","a"]]"#);
    }
}
