//! First-match stepping over a transition table.
//!
//! Non-determinism is resolved by always taking the first applicable edge in
//! declaration order. For real NFA semantics see
//! [`simulate_subset`](crate::automaton::simulate_subset).

use tracing::debug;

use crate::automaton::state::StateId;
use crate::automaton::symbol::Symbol;
use crate::automaton::table::{State, TransitionTable};
use crate::error::Result;

/// One move of the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceStep {
    pub index: usize,
    /// `None` when the move followed an epsilon edge.
    pub consumed: Option<char>,
    pub state: StateId,
    pub accepting: bool,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// Every input symbol was consumed.
    Exhausted,
    /// No edge applied at input `position`; the rest of the input is left unread.
    Stuck { position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationTrace {
    start: StateId,
    start_accepting: bool,
    steps: Vec<TraceStep>,
    consumed: usize,
    input_len: usize,
    halt: Halt,
}

impl SimulationTrace {
    /// Every move, in order.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// State the run began in.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// State after the last move, or the start state for an empty trace.
    pub fn final_state(&self) -> StateId {
        self.steps.last().map_or(self.start, |step| step.state)
    }

    /// Accepting flag of the state the run ended in, whether or not it got stuck.
    pub fn verdict(&self) -> bool {
        self.steps
            .last()
            .map_or(self.start_accepting, |step| step.accepting)
    }

    /// How the run ended.
    pub fn halt(&self) -> Halt {
        self.halt
    }

    /// Number of input symbols read.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Whether every input character was read.
    pub fn consumed_all(&self) -> bool {
        self.consumed == self.input_len
    }

    /// The whole input was read and the run ended in an accepting state.
    pub fn accepted(&self) -> bool {
        self.consumed_all() && self.verdict()
    }

    /// Visited states, starting with the start state.
    pub fn path(&self) -> Vec<StateId> {
        std::iter::once(self.start)
            .chain(self.steps.iter().map(|step| step.state))
            .collect()
    }

    /// Number of epsilon edges taken.
    pub fn epsilon_moves(&self) -> usize {
        self.steps.iter().filter(|s| s.consumed.is_none()).count()
    }
}

/// Step `input` through `table`, taking the first matching edge each time.
///
/// An epsilon edge is only considered when `allow_epsilon` is set; taking it
/// does not read the current symbol. A state may take at most `num_states`
/// epsilon moves in a row before the run counts as stuck.
pub fn simulate(input: &str, table: &TransitionTable, allow_epsilon: bool) -> SimulationTrace {
    let start = table.start();
    let mut current = start;
    let mut steps = Vec::new();
    let mut consumed = 0;
    let mut halt = Halt::Exhausted;
    let epsilon_budget = table.num_states();

    let mut chars = input.chars().peekable();
    let mut epsilon_run = 0;
    while let Some(&c) = chars.peek() {
        // Past the budget only character edges are considered.
        let next = table.first_match(current, c, allow_epsilon && epsilon_run < epsilon_budget);

        let Some(transition) = next else {
            debug!(state = table.name(current), symbol = %c, position = consumed, "simulation stuck");
            halt = Halt::Stuck { position: consumed };
            break;
        };

        current = transition.to;
        let read = match transition.symbol {
            Symbol::Epsilon => {
                epsilon_run += 1;
                None
            }
            Symbol::Char(_) => {
                chars.next();
                consumed += 1;
                epsilon_run = 0;
                Some(c)
            }
        };

        debug!(
            step = steps.len(),
            symbol = %transition.symbol,
            to = table.name(current),
            "simulation step"
        );
        steps.push(TraceStep {
            index: steps.len(),
            consumed: read,
            state: current,
            accepting: table.is_accepting(current),
        });
    }

    SimulationTrace {
        start,
        start_accepting: table.is_accepting(start),
        steps,
        consumed,
        input_len: input.chars().count(),
        halt,
    }
}

/// Convenience form taking raw parts instead of a prebuilt table.
pub fn simulate_with<S: AsRef<str>>(
    input: &str,
    states: impl IntoIterator<Item = State>,
    transitions: impl IntoIterator<Item = (S, S, Symbol)>,
    start: &str,
    accepting: &[&str],
    allow_epsilon: bool,
) -> Result<SimulationTrace> {
    let table = TransitionTable::new(states, transitions, start)?.with_accepting(accepting)?;
    Ok(simulate(input, &table, allow_epsilon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::demo_table;

    fn names(table: &TransitionTable, trace: &SimulationTrace) -> Vec<String> {
        trace
            .path()
            .into_iter()
            .map(|id| table.name(id).to_string())
            .collect()
    }

    #[test]
    fn test_accepting_run() {
        let table = demo_table();
        let trace = simulate("01", &table, false);
        assert_eq!(names(&table, &trace), ["q0", "q1", "q2"]);
        assert_eq!(trace.steps()[0].consumed, Some('0'));
        assert_eq!(trace.steps()[1].consumed, Some('1'));
        assert!(trace.verdict());
        assert!(trace.accepted());
        assert_eq!(trace.halt(), Halt::Exhausted);
    }

    #[test]
    fn test_rejecting_run() {
        let table = demo_table();
        let trace = simulate("10", &table, false);
        assert_eq!(names(&table, &trace), ["q0", "q0", "q1"]);
        assert!(!trace.verdict());
        assert!(trace.consumed_all());
    }

    #[test]
    fn test_empty_input() {
        let table = demo_table();
        let trace = simulate("", &table, true);
        assert!(trace.is_empty());
        assert!(!trace.verdict());

        let accepting_start = demo_table().with_accepting(["q0"]).unwrap();
        assert!(simulate("", &accepting_start, false).verdict());
    }

    #[test]
    fn test_stuck_keeps_unread_input() {
        let table = demo_table();
        let trace = simulate("01x1", &table, false);
        assert_eq!(trace.halt(), Halt::Stuck { position: 2 });
        assert_eq!(trace.consumed(), 2);
        assert!(!trace.consumed_all());
        // Still reports the flag of the state it stopped in.
        assert!(trace.verdict());
        assert!(!trace.accepted());
    }

    #[test]
    fn test_epsilon_edge_does_not_consume() {
        let table = demo_table();
        // q0 has no edge on 'x' except the epsilon edge to q1, and q1 is stuck on 'x'.
        let trace = simulate("x", &table, true);
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.steps()[0].consumed, None);
        assert_eq!(table.name(trace.final_state()), "q1");
        assert_eq!(trace.halt(), Halt::Stuck { position: 0 });
        assert_eq!(trace.epsilon_moves(), 1);
    }

    #[test]
    fn test_epsilon_loop_is_bounded() {
        let trace = simulate_with(
            "a",
            [State::new("p", false), State::new("q", false)],
            [("p", "q", Symbol::Epsilon), ("q", "p", Symbol::Epsilon)],
            "p",
            &[],
            true,
        )
        .unwrap();
        assert_eq!(trace.len(), 2);
        assert!(matches!(trace.halt(), Halt::Stuck { position: 0 }));
    }

    #[test]
    fn test_epsilon_budget_falls_through_to_symbol_edge() {
        let trace = simulate_with(
            "a",
            [State::new("p", false), State::new("q", false)],
            [("p", "p", Symbol::Epsilon), ("p", "q", Symbol::Char('a'))],
            "p",
            &["q"],
            true,
        )
        .unwrap();
        assert_eq!(trace.epsilon_moves(), 2);
        assert_eq!(trace.steps()[2].consumed, Some('a'));
        assert_eq!(trace.halt(), Halt::Exhausted);
        assert!(trace.accepted());
    }

    #[test]
    fn test_purity() {
        let table = demo_table();
        for input in ["", "0", "0101", "1110", "01x"] {
            assert_eq!(simulate(input, &table, true), simulate(input, &table, true));
        }
    }
}
