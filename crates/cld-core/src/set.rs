//! Insertion-idempotent collection with deterministic enumeration.
//!
//! [`Set`] stores its elements in a `HashSet`, so iteration order inside the
//! container is arbitrary. The only way to observe an order is
//! [`Set::slice`] (or the serde representation, which goes through it), and
//! that order is always ascending. Every consumer that prints, compares
//! sequences, or serialises a set therefore sees the same output for the same
//! contents, regardless of insertion order.
use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A set of unique elements enumerated in ascending order.
///
/// Two sets are equal iff they hold the same elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set<T: Eq + Hash> {
    elements: HashSet<T>,
}

impl<T: Eq + Hash + Ord> Set<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            elements: HashSet::new(),
        }
    }

    /// Creates an empty set with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: HashSet::with_capacity(capacity),
        }
    }

    /// Inserts `element`. Adding an element that is already present is a
    /// no-op.
    pub fn add(&mut self, element: T) {
        self.elements.insert(element);
    }

    /// Returns `true` if `element` is in the set.
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.elements.contains(element)
    }

    /// Returns references to every element in ascending order.
    pub fn slice(&self) -> Vec<&T> {
        let mut sorted: Vec<&T> = self.elements.iter().collect();
        sorted.sort_unstable();
        sorted
    }

    /// Consumes the set and returns its elements in ascending order.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let mut sorted: Vec<T> = self.elements.into_iter().collect();
        sorted.sort_unstable();
        sorted
    }

    /// Removes every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T: Eq + Hash + Ord> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Ord> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Eq + Hash + Ord> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T: Eq + Hash + Ord + Serialize> Serialize for Set<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.slice())
    }
}

impl<'de, T: Eq + Hash + Ord + Deserialize<'de>> Deserialize<'de> for Set<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<T>::deserialize(deserializer)?;
        Ok(elements.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut s = Set::new();
        s.add("tensions");
        s.add("tensions");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn contains_reports_membership() {
        let s: Set<&str> = ["clashes", "resistance"].into_iter().collect();
        assert!(s.contains("clashes"));
        assert!(!s.contains("tensions"));
    }

    #[test]
    fn slice_is_ascending() {
        let s: Set<&str> = ["tensions", "clashes", "tax burden", "resistance"]
            .into_iter()
            .collect();
        assert_eq!(
            s.slice(),
            vec![&"clashes", &"resistance", &"tax burden", &"tensions"]
        );
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: Set<u32> = [3, 1, 2].into_iter().collect();
        let b: Set<u32> = [2, 3, 1, 1].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut s: Set<u32> = [1, 2].into_iter().collect();
        s.clear();
        assert!(s.is_empty());
        assert!(!s.contains(&1));
    }

    #[test]
    fn serializes_sorted() {
        let s: Set<String> = ["b".to_owned(), "a".to_owned(), "c".to_owned()]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&s).expect("serialize");
        assert_eq!(json, r#"["a","b","c"]"#);
    }

    #[test]
    fn deserialize_drops_repeats() {
        let s: Set<String> = serde_json::from_str(r#"["x","y","x"]"#).expect("parse");
        assert_eq!(s.len(), 2);
    }
}
