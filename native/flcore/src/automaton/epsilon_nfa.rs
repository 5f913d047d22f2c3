//! Epsilon-NFA view of a transition table and subset stepping.

use std::collections::HashMap;

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, SymbolId, is_epsilon};
use crate::automaton::table::TransitionTable;

/// An epsilon-NFA over a dense alphabet.
#[derive(Debug, Clone)]
pub struct EpsilonNfa {
    num_states: StateId,
    start: StateId,
    final_states: StateSet,
    /// (source, symbol) -> destinations; epsilon edges use `EPSILON`
    transitions: HashMap<(StateId, SymbolId), StateSet>,
    /// Input characters, indexed by `SymbolId`
    alphabet: IndexSet<char>,
    /// Epsilon closure of every single state
    closures: Vec<StateSet>,
}

impl EpsilonNfa {
    /// Index the table edges by `(source, symbol)` and precompute closures.
    pub fn from_table(table: &TransitionTable) -> Self {
        let num_states = table.num_states() as StateId;
        // Sorted up front, so `insert_full` below only looks up indices.
        let mut alphabet: IndexSet<char> = table.alphabet().into_iter().collect();

        let mut transitions: HashMap<(StateId, SymbolId), StateSet> = HashMap::new();
        for t in table.transitions() {
            let symbol = match t.symbol.as_char() {
                Some(c) => alphabet.insert_full(c).0 as SymbolId,
                None => EPSILON,
            };
            transitions
                .entry((t.from, symbol))
                .or_insert_with(|| StateSet::with_capacity(num_states as usize))
                .insert(t.to);
        }

        let mut nfa = Self {
            num_states,
            start: table.start(),
            final_states: table.accepting_states(),
            transitions,
            alphabet,
            closures: Vec::new(),
        };
        let closures = (0..num_states)
            .map(|state| nfa.epsilon_closure_single(state))
            .collect();
        nfa.closures = closures;
        nfa
    }

    /// Number of states, same as the source table.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Input characters in `SymbolId` order.
    pub fn alphabet(&self) -> &IndexSet<char> {
        &self.alphabet
    }

    /// Dense id of `c`, if any edge reads it.
    pub fn symbol_id(&self, c: char) -> Option<SymbolId> {
        self.alphabet.get_index_of(&c).map(|i| i as SymbolId)
    }

    /// Depth-first closure of a single state.
    fn epsilon_closure_single(&self, state: StateId) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states as usize);
        let mut stack = vec![state];

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }

            if let Some(destinations) = self.transitions.get(&(s, EPSILON)) {
                stack.extend(destinations.iter().filter(|&d| !closure.contains(d)));
            }
        }

        trace!(state, closure = ?closure, "epsilon closure");
        closure
    }

    /// States reachable from `states` through epsilon edges alone.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states as usize);
        for state in states.iter() {
            if let Some(cached) = self.closures.get(state as usize) {
                closure.union_with(cached);
            }
        }
        closure
    }

    /// Epsilon-closed start set.
    pub fn initial(&self) -> StateSet {
        self.epsilon_closure(&StateSet::singleton(self.start, self.num_states as usize))
    }

    /// States reachable from `states` on `symbol`, epsilon-closed.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        debug_assert!(!is_epsilon(symbol), "use epsilon_closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.num_states as usize);
        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }
        self.epsilon_closure(&reached)
    }

    /// Active set after reading `c`; empty for characters outside the alphabet.
    pub fn step(&self, states: &StateSet, c: char) -> StateSet {
        match self.symbol_id(c) {
            Some(symbol) => self.move_on_symbol(states, symbol),
            None => StateSet::with_capacity(self.num_states as usize),
        }
    }

    /// Whether `states` holds an accepting state.
    pub fn is_final(&self, states: &StateSet) -> bool {
        states.intersects(&self.final_states)
    }
}

/// Active states after one input symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetStep {
    pub index: usize,
    pub consumed: char,
    pub states: StateSet,
    pub accepting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetTrace {
    initial: StateSet,
    initial_accepting: bool,
    steps: Vec<SubsetStep>,
    input_len: usize,
}

impl SubsetTrace {
    /// Active set before any input is read.
    pub fn initial(&self) -> &StateSet {
        &self.initial
    }

    /// One entry per consumed character.
    pub fn steps(&self) -> &[SubsetStep] {
        &self.steps
    }

    pub fn final_states(&self) -> &StateSet {
        self.steps.last().map_or(&self.initial, |step| &step.states)
    }

    /// The run read all input without the active set dying out.
    pub fn consumed_all(&self) -> bool {
        self.steps.len() == self.input_len && !self.final_states().is_empty()
    }

    /// Whether the last active set holds an accepting state.
    pub fn verdict(&self) -> bool {
        self.steps
            .last()
            .map_or(self.initial_accepting, |step| step.accepting)
    }
}

/// Step `input` through `table` tracking every active state at once.
///
/// Epsilon edges are always followed. The run stops early only when the
/// active set becomes empty.
pub fn simulate_subset(input: &str, table: &TransitionTable) -> SubsetTrace {
    let nfa = EpsilonNfa::from_table(table);
    let initial = nfa.initial();
    let mut current = initial.clone();
    let mut steps = Vec::new();

    for (index, c) in input.chars().enumerate() {
        current = nfa.step(&current, c);
        let accepting = nfa.is_final(&current);
        debug!(step = index, symbol = %c, states = ?current, accepting, "subset step");
        steps.push(SubsetStep {
            index,
            consumed: c,
            states: current.clone(),
            accepting,
        });
        if current.is_empty() {
            break;
        }
    }

    SubsetTrace {
        initial_accepting: nfa.is_final(&initial),
        initial,
        steps,
        input_len: input.chars().count(),
    }
}
