//! PyO3 bindings, enabled with the `python` feature.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::automaton::{self, Symbol, TransitionTable, determinize};
use crate::config::{AutomatonConfig, demo_table};
use crate::error::FlError;
use crate::language::{self, LanguageId};
use crate::pumping::{self, Decomposition, Demonstration, PumpingLength, repeat_count};

impl From<FlError> for PyErr {
    fn from(err: FlError) -> Self {
        match err {
            FlError::Io(_) => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

fn parse_language(tag: &str) -> PyResult<LanguageId> {
    Ok(tag.parse::<LanguageId>()?)
}

/// An immutable automaton definition.
#[pyclass(name = "TransitionTable", module = "flcore.automaton", frozen)]
pub struct PyTransitionTable {
    table: TransitionTable,
}

#[pymethods]
impl PyTransitionTable {
    /// `states` is a list of `(name, accepting)`, `transitions` a list of
    /// `(from, to, symbol)` where symbol is one character or an epsilon marker.
    #[new]
    fn new(
        states: Vec<(String, bool)>,
        transitions: Vec<(String, String, String)>,
        start: &str,
    ) -> PyResult<Self> {
        let transitions = transitions
            .into_iter()
            .map(|(from, to, symbol)| Ok((from, to, symbol.parse::<Symbol>()?)))
            .collect::<Result<Vec<_>, FlError>>()?;
        let table = TransitionTable::new(
            states
                .into_iter()
                .map(|(name, accepting)| automaton::State::new(name, accepting)),
            transitions,
            start,
        )?;
        Ok(Self { table })
    }

    /// The built-in three-state table.
    #[staticmethod]
    fn demo() -> Self {
        Self {
            table: demo_table(),
        }
    }

    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let table = AutomatonConfig::from_json(json)?.into_table()?;
        Ok(Self { table })
    }

    fn to_json(&self) -> PyResult<String> {
        Ok(AutomatonConfig::from_table(&self.table).to_json()?)
    }

    #[pyo3(signature = (input, allow_epsilon = false))]
    fn simulate(&self, input: &str, allow_epsilon: bool) -> PySimulationTrace {
        let trace = automaton::simulate(input, &self.table, allow_epsilon);
        PySimulationTrace {
            steps: trace
                .steps()
                .iter()
                .map(|step| {
                    (
                        step.index,
                        step.consumed,
                        self.table.name(step.state).to_string(),
                        step.accepting,
                    )
                })
                .collect(),
            path: trace
                .path()
                .into_iter()
                .map(|id| self.table.name(id).to_string())
                .collect(),
            verdict: trace.verdict(),
            consumed_all: trace.consumed_all(),
        }
    }

    /// Active state names after each symbol, and the verdict.
    fn simulate_subset(&self, input: &str) -> (Vec<Vec<String>>, bool) {
        let trace = automaton::simulate_subset(input, &self.table);
        let sets = trace
            .steps()
            .iter()
            .map(|step| {
                step.states
                    .iter()
                    .map(|id| self.table.name(id).to_string())
                    .collect()
            })
            .collect();
        (sets, trace.verdict())
    }

    fn is_deterministic(&self) -> bool {
        self.table.is_deterministic()
    }

    /// Number of states in the minimal DFA for this table.
    fn minimal_dfa_size(&self) -> u32 {
        determinize(&self.table).minimize().num_states()
    }

    fn __repr__(&self) -> String {
        format!(
            "TransitionTable(states={}, transitions={}, start={:?})",
            self.table.num_states(),
            self.table.transitions().len(),
            self.table.name(self.table.start())
        )
    }
}

/// Result of a first-match run.
#[pyclass(name = "SimulationTrace", module = "flcore.automaton", frozen)]
pub struct PySimulationTrace {
    /// `(index, consumed or None, state name, accepting)`
    #[pyo3(get)]
    steps: Vec<(usize, Option<char>, String, bool)>,
    #[pyo3(get)]
    path: Vec<String>,
    #[pyo3(get)]
    verdict: bool,
    #[pyo3(get)]
    consumed_all: bool,
}

#[pymethods]
impl PySimulationTrace {
    fn __len__(&self) -> usize {
        self.steps.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationTrace(path={:?}, verdict={})",
            self.path, self.verdict
        )
    }
}

#[pyfunction]
fn is_member(s: &str, language: &str) -> bool {
    language::is_member_tag(s, language)
}

#[pyfunction]
fn definition(language: &str) -> PyResult<&'static str> {
    Ok(parse_language(language)?.definition())
}

#[pyfunction]
fn pump(s: &str, x_len: usize, y_len: usize, z_len: usize, i: i64) -> PyResult<String> {
    let decomposition = Decomposition::new(x_len, y_len, z_len)?;
    Ok(pumping::pump(s, &decomposition, repeat_count(i)?)?)
}

#[pyfunction]
fn evaluate_contradiction(
    s: &str,
    x_len: usize,
    y_len: usize,
    z_len: usize,
    language: &str,
    i: i64,
) -> PyResult<bool> {
    let decomposition = Decomposition::new(x_len, y_len, z_len)?;
    Ok(pumping::evaluate_contradiction(
        s,
        &decomposition,
        parse_language(language)?,
        repeat_count(i)?,
    )?)
}

/// Narration of each walkthrough step. `p` defaults to `min(3, |s| / 2)`.
#[pyfunction]
#[pyo3(signature = (s, language, p = None))]
fn demonstration(s: &str, language: &str, p: Option<usize>) -> PyResult<Vec<String>> {
    let language = parse_language(language)?;
    let demo = match p {
        Some(p) => Demonstration::build(s, language, PumpingLength(p))?,
        None => Demonstration::for_input(s, language)?,
    };
    Ok(demo.steps().iter().map(ToString::to_string).collect())
}

fn import_submodule<'py>(
    py: Python<'py>,
    m: &Bound<'py, PyModule>,
    package: &str,
    name: &str,
    import_func: impl FnOnce(&Bound<'py, PyModule>) -> PyResult<()>,
) -> PyResult<()> {
    let submodule = PyModule::new(py, name)?;
    import_func(&submodule)?;

    // Register under sys.modules so `import flcore.<name>` works
    let sys_modules = PyModule::import(py, "sys")?.getattr("modules")?;
    sys_modules.set_item(format!("{package}.{name}"), submodule.clone())?;

    m.add_submodule(&submodule)?;
    Ok(())
}

fn language_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(is_member, m)?)?;
    m.add_function(wrap_pyfunction!(definition, m)?)?;
    m.add(
        "LANGUAGES",
        LanguageId::ALL.map(|lang| lang.tag()).to_vec(),
    )?;
    Ok(())
}

fn automaton_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTransitionTable>()?;
    m.add_class::<PySimulationTrace>()?;
    Ok(())
}

fn pumping_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(pump, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_contradiction, m)?)?;
    m.add_function(wrap_pyfunction!(demonstration, m)?)?;
    m.add("DEFAULT_PUMPING_LENGTH", PumpingLength::DEFAULT.get())?;
    Ok(())
}

#[pymodule]
fn flcore(m: &Bound<'_, PyModule>) -> PyResult<()> {
    import_submodule(m.py(), m, "flcore", "language", language_module)?;
    import_submodule(m.py(), m, "flcore", "automaton", automaton_module)?;
    import_submodule(m.py(), m, "flcore", "pumping", pumping_module)?;
    Ok(())
}
