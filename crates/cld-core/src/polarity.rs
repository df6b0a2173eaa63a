/// Polarity of a causal influence.
///
/// Serialises to and from the single-character symbols used by the response
/// schemas: `"+"` and `"-"`. Any other string is rejected during decoding.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sign of a causal influence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Polarity {
    /// A change in the cause moves the effect in the same direction.
    #[default]
    #[serde(rename = "+")]
    Positive,
    /// A change in the cause moves the effect in the opposite direction.
    #[serde(rename = "-")]
    Negative,
}

impl Polarity {
    /// Every polarity symbol accepted by the response schemas, in schema order.
    pub const SYMBOLS: [&'static str; 2] = ["+", "-"];

    /// Returns the schema symbol for this polarity.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Negative => "-",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
