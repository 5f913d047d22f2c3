//! Step-by-step pumping-lemma walkthroughs.
//!
//! Every step is computed up front by [`Demonstration::build`]. A front end
//! only advances an index and renders [`DemoStep`]s, so it never re-runs the
//! argument.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FlError, Result};
use crate::language::{LanguageId, is_member};
use crate::pumping::{Decomposition, PumpingLength, pump};

/// Repeat count shown in the "pump y" step.
const DEMO_PUMP: usize = 2;

/// One stage of a pumping-lemma walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemoStep {
    AssumeRegular {
        p: PumpingLength,
    },
    ChooseString {
        s: String,
        len: usize,
    },
    Split {
        x: String,
        y: String,
        z: String,
    },
    Pump {
        i: usize,
        pumped: String,
    },
    Conclude {
        pumped: String,
        in_language: bool,
    },
}

impl fmt::Display for DemoStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoStep::AssumeRegular { p } => {
                write!(f, "Step 1: Assume the language is regular with pumping length p = {p}.")
            }
            DemoStep::ChooseString { s, len } => {
                write!(f, "Step 2: You chose s = \"{s}\" (|s| = {len} ≥ p).")
            }
            DemoStep::Split { x, y, z } => write!(
                f,
                "Step 3: Split s into x = \"{x}\", y = \"{y}\", z = \"{z}\" (|xy| ≤ p, |y| > 0)."
            ),
            DemoStep::Pump { i, pumped } => {
                write!(f, "Step 4: Pump y (i = {i}): \"{pumped}\".")
            }
            DemoStep::Conclude {
                pumped,
                in_language: true,
            } => write!(
                f,
                "Step 5: The pumped string \"{pumped}\" is in the language. \
                 Thus, the language is possibly regular (try more splits!)."
            ),
            DemoStep::Conclude {
                pumped,
                in_language: false,
            } => write!(
                f,
                "Step 5: The pumped string \"{pumped}\" is not in the language. \
                 Thus, the language is not regular."
            ),
        }
    }
}

/// A precomputed walkthrough. The caller only moves an index through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demonstration {
    pub language: LanguageId,
    pub decomposition: Decomposition,
    steps: Vec<DemoStep>,
}

impl Demonstration {
    /// Walk through the lemma for `s`, splitting with `x` empty and `|y| = p`.
    pub fn build(s: &str, language: LanguageId, p: PumpingLength) -> Result<Self> {
        if !is_member(s, language) {
            return Err(FlError::NotInLanguage {
                input: s.to_string(),
                language,
            });
        }
        p.check_fits(s)?;

        let decomposition = Decomposition::leading(s, p)?;
        let (x, y, z) = decomposition.split(s)?;
        let pumped = pump(s, &decomposition, DEMO_PUMP)?;
        let in_language = is_member(&pumped, language);

        let steps = vec![
            DemoStep::AssumeRegular { p },
            DemoStep::ChooseString {
                s: s.to_string(),
                len: s.chars().count(),
            },
            DemoStep::Split {
                x: x.to_string(),
                y: y.to_string(),
                z: z.to_string(),
            },
            DemoStep::Pump {
                i: DEMO_PUMP,
                pumped: pumped.clone(),
            },
            DemoStep::Conclude {
                pumped,
                in_language,
            },
        ];

        Ok(Self {
            language,
            decomposition,
            steps,
        })
    }

    /// Same as [`Demonstration::build`] with `p = min(3, |s| / 2)`.
    pub fn for_input(s: &str, language: LanguageId) -> Result<Self> {
        Self::build(s, language, PumpingLength::for_input(s))
    }

    /// All five steps in order.
    pub fn steps(&self) -> &[DemoStep] {
        &self.steps
    }

    /// The step at a zero-based `index`, if the walkthrough has one.
    pub fn get(&self, index: usize) -> Option<&DemoStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the walkthrough ends in a contradiction.
    pub fn is_contradiction(&self) -> bool {
        matches!(
            self.steps.last(),
            Some(DemoStep::Conclude {
                in_language: false,
                ..
            })
        )
    }
}
