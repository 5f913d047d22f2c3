//! Transition labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FlError;

/// Dense index of an alphabet symbol inside the NFA/DFA tables.
/// The special value `EPSILON` represents an epsilon (empty) transition.
pub type SymbolId = u32;

/// Special symbol ID representing epsilon transitions.
pub const EPSILON: SymbolId = u32::MAX;

/// Check if a symbol index is the epsilon marker.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// The label on a transition edge: a single input character, or epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Char(char),
    Epsilon,
}

impl Symbol {
    /// Whether this is the epsilon marker.
    pub fn is_epsilon(self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The input character, or `None` for epsilon.
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Char(c) => Some(c),
            Symbol::Epsilon => None,
        }
    }

    /// Whether this edge may be taken while reading `c`.
    #[inline]
    pub fn matches(self, c: char, allow_epsilon: bool) -> bool {
        match self {
            Symbol::Char(own) => own == c,
            Symbol::Epsilon => allow_epsilon,
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{c}"),
            Symbol::Epsilon => f.write_str("ε"),
        }
    }
}

impl FromStr for Symbol {
    type Err = FlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ε" | "λ" => return Ok(Symbol::Epsilon),
            _ if s.eq_ignore_ascii_case("eps") || s.eq_ignore_ascii_case("epsilon") => {
                return Ok(Symbol::Epsilon);
            }
            _ => {}
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Symbol::Char(c)),
            _ => Err(FlError::InvalidSymbol(s.to_string())),
        }
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
