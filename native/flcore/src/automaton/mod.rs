//! Finite automata over a fixed transition table.
//!
//! This module provides:
//! - First-match stepping with an explicit step trace
//! - Subset (powerset) stepping with epsilon closure
//! - Subset construction (NFA to DFA conversion)
//! - Hopcroft's DFA minimization algorithm

mod dfa;
mod epsilon_nfa;
mod simulate;
mod state;
mod subset_construction;
mod symbol;
mod table;

pub use dfa::Dfa;
pub use epsilon_nfa::{EpsilonNfa, SubsetStep, SubsetTrace, simulate_subset};
pub use simulate::{Halt, SimulationTrace, TraceStep, simulate, simulate_with};
pub use state::{StateId, StateSet};
pub use subset_construction::{determinize, subset_construction};
pub use symbol::{EPSILON, Symbol, SymbolId, is_epsilon};
pub use table::{State, Transition, TransitionTable};
