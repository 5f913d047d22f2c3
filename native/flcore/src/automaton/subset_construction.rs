//! Powerset construction from an epsilon-NFA to a DFA.

use indexmap::IndexMap;

use crate::automaton::dfa::Dfa;
use crate::automaton::epsilon_nfa::EpsilonNfa;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::SymbolId;
use crate::automaton::table::TransitionTable;

/// Determinize `table`. Missing transitions stay missing (no dead state).
pub fn determinize(table: &TransitionTable) -> Dfa {
    subset_construction(&EpsilonNfa::from_table(table))
}

/// Powerset construction over an already built epsilon-NFA.
pub fn subset_construction(nfa: &EpsilonNfa) -> Dfa {
    let mut dfa = Dfa::new(nfa.alphabet().iter().copied().collect());
    // NFA state set -> DFA state
    let mut state_mapping: IndexMap<StateSet, StateId> = IndexMap::new();
    let mut worklist: Vec<(StateId, StateSet)> = Vec::new();

    let initial = nfa.initial();
    let start = dfa.add_state(nfa.is_final(&initial));
    dfa.set_start_state(start);
    state_mapping.insert(initial.clone(), start);
    worklist.push((start, initial));

    while let Some((current, nfa_set)) = worklist.pop() {
        for symbol in 0..nfa.alphabet().len() as SymbolId {
            let next_set = nfa.move_on_symbol(&nfa_set, symbol);
            if next_set.is_empty() {
                continue;
            }

            let next = match state_mapping.get(&next_set) {
                Some(&existing) => existing,
                None => {
                    let created = dfa.add_state(nfa.is_final(&next_set));
                    state_mapping.insert(next_set.clone(), created);
                    worklist.push((created, next_set));
                    created
                }
            };
            dfa.add_transition(current, symbol, next);
        }
    }

    dfa
}
