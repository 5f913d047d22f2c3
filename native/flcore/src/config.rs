//! Automaton definitions loaded from JSON.
//!
//! ```json
//! {
//!   "states": [{ "name": "q0" }, { "name": "q1", "accepting": true }],
//!   "start": "q0",
//!   "transitions": [{ "from": "q0", "to": "q1", "symbol": "a" }]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::automaton::{State, Symbol, TransitionTable};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub from: String,
    pub to: String,
    pub symbol: Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonConfig {
    pub states: Vec<State>,
    pub start: String,
    #[serde(default)]
    pub transitions: Vec<TransitionConfig>,
}

impl AutomatonConfig {
    /// Parse a definition from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON definition file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading automaton definition");
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate and freeze into a table.
    pub fn into_table(self) -> Result<TransitionTable> {
        TransitionTable::new(
            self.states,
            self.transitions
                .into_iter()
                .map(|t| (t.from, t.to, t.symbol)),
            &self.start,
        )
    }

    /// Definition describing an existing table.
    pub fn from_table(table: &TransitionTable) -> Self {
        Self {
            states: table.states().collect(),
            start: table.name(table.start()).to_string(),
            transitions: table
                .transitions()
                .iter()
                .map(|t| TransitionConfig {
                    from: table.name(t.from).to_string(),
                    to: table.name(t.to).to_string(),
                    symbol: t.symbol,
                })
                .collect(),
        }
    }
}

/// The three-state table the visualizer ships with: `q2` accepts, and one
/// epsilon edge leads from `q0` to `q1`.
pub fn demo_config() -> AutomatonConfig {
    let edge = |from: &str, to: &str, symbol: Symbol| TransitionConfig {
        from: from.to_string(),
        to: to.to_string(),
        symbol,
    };
    AutomatonConfig {
        states: vec![
            State::new("q0", false),
            State::new("q1", false),
            State::new("q2", true),
        ],
        start: "q0".to_string(),
        transitions: vec![
            edge("q0", "q1", Symbol::Char('0')),
            edge("q1", "q2", Symbol::Char('1')),
            edge("q0", "q0", Symbol::Char('1')),
            edge("q1", "q1", Symbol::Char('0')),
            edge("q2", "q0", Symbol::Char('0')),
            edge("q2", "q0", Symbol::Char('1')),
            edge("q0", "q1", Symbol::Epsilon),
        ],
    }
}

/// The built-in three-state table, ready to simulate.
pub fn demo_table() -> TransitionTable {
    // The built-in definition only names declared states.
    demo_config()
        .into_table()
        .unwrap_or_else(|err| unreachable!("built-in automaton is invalid: {err}"))
}
