//! Deterministic finite automaton with Hopcroft minimization.

use std::collections::{HashMap, VecDeque};

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::SymbolId;

/// A partial DFA: a missing transition rejects.
#[derive(Debug, Clone)]
pub struct Dfa {
    num_states: StateId,
    start_state: Option<StateId>,
    final_states: StateSet,
    /// (source, symbol) -> destination
    transitions: HashMap<(StateId, SymbolId), StateId>,
    /// Input characters, indexed by `SymbolId`
    alphabet: Vec<char>,
}

impl Dfa {
    /// Empty DFA over `alphabet`, indexed by `SymbolId`.
    pub fn new(alphabet: Vec<char>) -> Self {
        Self {
            num_states: 0,
            start_state: None,
            final_states: StateSet::default(),
            transitions: HashMap::new(),
            alphabet,
        }
    }

    /// Adds a state and returns its id.
    pub fn add_state(&mut self, is_final: bool) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        if is_final {
            self.final_states.insert(id);
        }
        id
    }

    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = Some(state);
    }

    /// Sets the single successor of `source` on `symbol`.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.transitions.insert((source, symbol), destination);
    }

    /// Successor of `source` on `symbol`, if defined.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// `None` until a start state is set.
    pub fn start_state(&self) -> Option<StateId> {
        self.start_state
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// All transitions as `(source, char, destination)`, sorted.
    pub fn transitions(&self) -> Vec<(StateId, char, StateId)> {
        let mut edges: Vec<_> = self
            .transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, self.alphabet[sym as usize], dst))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Runs `input`. Unknown characters and missing edges reject.
    pub fn accepts(&self, input: &str) -> bool {
        let Some(mut state) = self.start_state else {
            return false;
        };
        for c in input.chars() {
            let Some(symbol) = self.alphabet.iter().position(|&a| a == c) else {
                return false;
            };
            match self.transition(state, symbol as SymbolId) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.final_states.contains(state)
    }

    /// Whether no accepting state is reachable from the start state.
    pub fn is_empty(&self) -> bool {
        !self.reachable_states().intersects(&self.final_states)
    }

    fn reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.num_states as usize);
        let Some(start) = self.start_state else {
            return reachable;
        };

        let mut queue = VecDeque::from([start]);
        while let Some(state) = queue.pop_front() {
            if !reachable.insert(state) {
                continue;
            }
            for symbol in 0..self.alphabet.len() as SymbolId {
                if let Some(next) = self.transition(state, symbol) {
                    queue.push_back(next);
                }
            }
        }
        reachable
    }

    /// Minimal equivalent DFA, built by Hopcroft partition refinement.
    ///
    /// Refinement runs on the completed automaton (an implicit sink absorbs
    /// missing transitions); the sink's class is dropped again afterwards,
    /// so the result is partial just like the input.
    pub fn minimize(&self) -> Dfa {
        let mut minimized = Dfa::new(self.alphabet.clone());
        let Some(start) = self.start_state else {
            return minimized;
        };

        let reachable: Vec<StateId> = self.reachable_states().iter().collect();
        let sink = self.num_states;
        let symbols = self.alphabet.len() as SymbolId;
        let delta = |state: StateId, symbol: SymbolId| -> StateId {
            if state == sink {
                sink
            } else {
                self.transition(state, symbol).unwrap_or(sink)
            }
        };

        let mut universe: StateSet = reachable.iter().copied().collect();
        universe.insert(sink);

        // destination, symbol -> sources
        let mut reverse: HashMap<(StateId, SymbolId), StateSet> = HashMap::new();
        for state in universe.iter() {
            for symbol in 0..symbols {
                reverse
                    .entry((delta(state, symbol), symbol))
                    .or_default()
                    .insert(state);
            }
        }

        let finals = universe.intersection(&self.final_states);
        let non_finals = universe.difference(&self.final_states);
        let mut partitions: Vec<StateSet> = [finals, non_finals]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect();

        let mut worklist: VecDeque<(usize, SymbolId)> = (0..partitions.len())
            .flat_map(|idx| (0..symbols).map(move |symbol| (idx, symbol)))
            .collect();

        while let Some((splitter_idx, symbol)) = worklist.pop_front() {
            let splitter = partitions[splitter_idx].clone();
            let mut predecessors = StateSet::default();
            for target in splitter.iter() {
                if let Some(sources) = reverse.get(&(target, symbol)) {
                    predecessors.union_with(sources);
                }
            }
            if predecessors.is_empty() {
                continue;
            }

            for part_idx in 0..partitions.len() {
                let inside = partitions[part_idx].intersection(&predecessors);
                if inside.is_empty() {
                    continue;
                }
                let outside = partitions[part_idx].difference(&predecessors);
                if outside.is_empty() {
                    continue;
                }

                // Keep the larger half in place and queue the smaller one.
                let (keep, split) = if inside.len() <= outside.len() {
                    (outside, inside)
                } else {
                    (inside, outside)
                };
                partitions[part_idx] = keep;
                let new_idx = partitions.len();
                partitions.push(split);
                worklist.extend((0..symbols).map(|sym| (new_idx, sym)));
            }
        }

        let mut class_of: HashMap<StateId, StateId> = HashMap::new();
        for partition in partitions.iter().filter(|p| !p.contains(sink)) {
            let class = minimized.add_state(partition.intersects(&self.final_states));
            for state in partition.iter() {
                class_of.insert(state, class);
            }
        }

        let Some(&new_start) = class_of.get(&start) else {
            // The start state is equivalent to the sink: nothing is accepted.
            return Dfa::new(self.alphabet.clone());
        };
        minimized.set_start_state(new_start);

        for partition in partitions.iter().filter(|p| !p.contains(sink)) {
            let Some(representative) = partition.iter().next() else {
                continue;
            };
            let from = class_of[&representative];
            for symbol in 0..symbols {
                if let Some(&to) = class_of.get(&delta(representative, symbol)) {
                    minimized.add_transition(from, symbol, to);
                }
            }
        }

        minimized
    }
}
