//! Transition tables: a fixed state set plus edges in declaration order.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use crate::error::{FlError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    #[serde(default)]
    pub accepting: bool,
}

impl State {
    /// A named state.
    pub fn new(name: impl Into<String>, accepting: bool) -> Self {
        Self {
            name: name.into(),
            accepting,
        }
    }
}

/// An edge between two states of a table, addressed by [`StateId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub symbol: Symbol,
}

/// A finite automaton definition. Immutable once built.
///
/// Edges keep their declaration order, which is what first-match stepping
/// relies on. Several edges may share a `(from, symbol)` pair.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    /// State name -> (id, accepting); ids follow insertion order
    states: IndexMap<String, bool>,
    transitions: Vec<Transition>,
    start: StateId,
}

impl TransitionTable {
    /// Build a table from named parts, checking that every referenced state
    /// is declared exactly once.
    pub fn new<S: AsRef<str>>(
        states: impl IntoIterator<Item = State>,
        transitions: impl IntoIterator<Item = (S, S, Symbol)>,
        start: &str,
    ) -> Result<Self> {
        let mut names = IndexMap::new();
        for state in states {
            if names.contains_key(&state.name) {
                return Err(FlError::DuplicateState(state.name));
            }
            names.insert(state.name, state.accepting);
        }

        let lookup = |name: &str| -> Result<StateId> {
            names
                .get_index_of(name)
                .map(|idx| idx as StateId)
                .ok_or_else(|| FlError::UnknownState(name.to_string()))
        };

        let start = lookup(start)?;
        let transitions = transitions
            .into_iter()
            .map(|(from, to, symbol)| {
                Ok(Transition {
                    from: lookup(from.as_ref())?,
                    to: lookup(to.as_ref())?,
                    symbol,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            states: names,
            transitions,
            start,
        })
    }

    /// Rebuild a table with a different accepting set, given by name.
    pub fn with_accepting<S: AsRef<str>>(
        mut self,
        accepting: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let wanted = accepting
            .into_iter()
            .map(|name| self.state_id(name.as_ref()))
            .collect::<Result<BTreeSet<_>>>()?;
        for (idx, flag) in self.states.values_mut().enumerate() {
            *flag = wanted.contains(&(idx as StateId));
        }
        Ok(self)
    }

    /// Number of declared states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Id of the start state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Edges in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Id of the state called `name`.
    pub fn state_id(&self, name: &str) -> Result<StateId> {
        self.states
            .get_index_of(name)
            .map(|idx| idx as StateId)
            .ok_or_else(|| FlError::UnknownState(name.to_string()))
    }

    /// Name of a state. Ids handed out by this table are always valid.
    pub fn name(&self, state: StateId) -> &str {
        self.states
            .get_index(state as usize)
            .map(|(name, _)| name.as_str())
            .unwrap_or("?")
    }

    /// Whether `state` is accepting. Unknown ids are not.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.states
            .get_index(state as usize)
            .is_some_and(|(_, &accepting)| accepting)
    }

    /// Ids of every accepting state.
    pub fn accepting_states(&self) -> StateSet {
        self.states
            .values()
            .enumerate()
            .filter(|&(_, &accepting)| accepting)
            .map(|(idx, _)| idx as StateId)
            .collect()
    }

    /// Declared states, in order.
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.states
            .iter()
            .map(|(name, &accepting)| State::new(name.clone(), accepting))
    }

    /// Input characters used on non-epsilon edges, sorted.
    pub fn alphabet(&self) -> Vec<char> {
        self.transitions
            .iter()
            .filter_map(|t| t.symbol.as_char())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether any edge is an epsilon edge.
    pub fn has_epsilon(&self) -> bool {
        self.transitions.iter().any(|t| t.symbol.is_epsilon())
    }

    /// No epsilon edges and at most one edge per `(state, symbol)` pair.
    pub fn is_deterministic(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.transitions
            .iter()
            .all(|t| !t.symbol.is_epsilon() && seen.insert((t.from, t.symbol)))
    }

    /// First edge in declaration order leaving `state` that may be taken on `c`.
    pub fn first_match(&self, state: StateId, c: char, allow_epsilon: bool) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.from == state && t.symbol.matches(c, allow_epsilon))
    }
}
