//! Built-in pumping problems.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::language::LanguageId;
use crate::pumping::{Decomposition, evaluate_contradiction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeProblem {
    pub s: String,
    pub decomposition: Decomposition,
    pub language: LanguageId,
    /// None of the catalogue languages is regular.
    pub is_regular: bool,
}

impl PracticeProblem {
    fn new(s: &str, (x_len, y_len, z_len): (usize, usize, usize), language: LanguageId) -> Self {
        Self {
            s: s.to_string(),
            decomposition: Decomposition {
                x_len,
                y_len,
                z_len,
            },
            language,
            is_regular: false,
        }
    }

    /// Grade an answer to "is this language regular?".
    pub fn check_answer(&self, says_regular: bool) -> bool {
        says_regular == self.is_regular
    }

    /// Membership of `x · y^i · z` for this problem's split.
    pub fn pumped_in_language(&self, i: usize) -> Result<bool> {
        evaluate_contradiction(&self.s, &self.decomposition, self.language, i)
    }
}

/// The fixed practice problem for each language.
pub fn practice(language: LanguageId) -> PracticeProblem {
    match language {
        LanguageId::EqualAB => PracticeProblem::new("aabb", (1, 1, 2), language),
        LanguageId::NGreaterM => PracticeProblem::new("aaab", (2, 1, 1), language),
        LanguageId::AnBn => PracticeProblem::new("aaabbb", (1, 2, 3), language),
        LanguageId::Ww => PracticeProblem::new("abab", (1, 1, 2), language),
    }
}

/// Pumping items from the quiz. Their splits are fixed per question and are
/// not required to respect `|xy| <= 3`.
pub fn quiz_problems() -> Vec<PracticeProblem> {
    vec![
        PracticeProblem::new("aaaabbbb", (2, 2, 4), LanguageId::EqualAB),
        PracticeProblem::new("aaaaabbbb", (3, 2, 4), LanguageId::NGreaterM),
    ]
}
