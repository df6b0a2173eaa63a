/// Normalised variable names.
///
/// A [`Variable`] is the node identity used by every derived view of a
/// [`crate::Map`]: the variable set, the edge list, and the feedback loops.
/// Construction trims surrounding whitespace and case-folds the remainder, so
/// `"Tax Burden"`, `" tax burden "` and `"TAX BURDEN"` all denote one node.
///
/// The raw spelling written by the model is kept on [`crate::Relationship`]
/// and [`crate::RelationshipEntry`]; normalisation only happens when a view is
/// derived.
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Returns the canonical form of a variable name: trimmed and lower-cased.
///
/// Blank input normalises to the empty string, which is a legal (if odd)
/// vertex name.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A normalised variable name.
///
/// The inner string is immutable once constructed and always equals
/// [`normalize`] applied to itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Variable(String);

impl Variable {
    /// Normalises `name` and wraps the result.
    pub fn new(name: &str) -> Self {
        Self(normalize(name))
    }

    /// Returns the normalised name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the variable and returns the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Variable {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl Deref for Variable {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Variable {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Variable {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Variable {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Variable {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for Variable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Variable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}
