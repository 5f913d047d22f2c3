//! Pumping lemma machinery: pumped strings and the contradiction argument.
//!
//! Nothing here decides regularity. [`evaluate_contradiction`] only reports
//! whether a pumped string stays in the language; a `false` for some `i` is
//! evidence the caller may present as a contradiction. [`refute`] runs the
//! full argument for one string: every valid split must fail for some `i`.

pub mod catalog;
mod decomposition;
mod demonstration;

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FlError, Result};
use crate::language::{LanguageId, is_member};

pub use decomposition::{Decomposition, PumpingLength};
pub use demonstration::{DemoStep, Demonstration};

/// `x · y^i · z`. `pump(s, d, 1) == s` for every valid `d`.
pub fn pump(s: &str, decomposition: &Decomposition, i: usize) -> Result<String> {
    let (x, y, z) = decomposition.split(s)?;
    let capacity = y
        .len()
        .checked_mul(i)
        .and_then(|len| len.checked_add(x.len() + z.len()))
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or_else(|| FlError::invalid(format!("pumping {y:?} {i} times overflows")))?;
    let mut pumped = String::new();
    pumped
        .try_reserve_exact(capacity)
        .map_err(|err| FlError::invalid(format!("pumped string of {capacity} bytes: {err}")))?;
    pumped.push_str(x);
    for _ in 0..i {
        pumped.push_str(y);
    }
    pumped.push_str(z);
    Ok(pumped)
}

/// Whether `x · y^i · z` is still a member of `language`.
pub fn evaluate_contradiction(
    s: &str,
    decomposition: &Decomposition,
    language: LanguageId,
    i: usize,
) -> Result<bool> {
    Ok(is_member(&pump(s, decomposition, i)?, language))
}

/// Signed entry point for callers that cannot rule out a negative count.
pub fn repeat_count(i: i64) -> Result<usize> {
    usize::try_from(i).map_err(|_| FlError::invalid(format!("repeat count must be non-negative, got {i}")))
}

/// One press of "pump y".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PumpOutcome {
    pub i: usize,
    pub pumped: String,
    pub in_language: bool,
}

/// Pump `s` for every `i` in `range`.
pub fn explore(
    s: &str,
    decomposition: &Decomposition,
    language: LanguageId,
    range: RangeInclusive<usize>,
) -> Result<Vec<PumpOutcome>> {
    decomposition.validate(s, None)?;
    range
        .map(|i| {
            let pumped = pump(s, decomposition, i)?;
            let in_language = is_member(&pumped, language);
            Ok(PumpOutcome {
                i,
                pumped,
                in_language,
            })
        })
        .collect()
}

/// A split together with the repeat count that pumps it out of the language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    pub decomposition: Decomposition,
    pub i: usize,
    pub pumped: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Refutation {
    /// Every split allowed by `p` leaves the language for some `i`.
    Refuted { witnesses: Vec<Witness> },
    /// This split stayed in the language for every tried `i`.
    Survives { decomposition: Decomposition },
}

impl Refutation {
    /// Whether every split was pumped out of the language.
    pub fn is_refuted(&self) -> bool {
        matches!(self, Refutation::Refuted { .. })
    }
}

/// Try every decomposition of `s` with `|xy| <= p` and `|y| > 0`, looking for
/// the smallest `i` in `0..=max_i` that pumps `s` out of `language`.
pub fn refute(s: &str, language: LanguageId, p: PumpingLength, max_i: usize) -> Result<Refutation> {
    if !is_member(s, language) {
        return Err(FlError::NotInLanguage {
            input: s.to_string(),
            language,
        });
    }
    p.check_fits(s)?;
    let len = s.chars().count();

    let mut witnesses = Vec::new();
    for decomposition in Decomposition::enumerate(len, p) {
        let mut found = None;
        for i in 0..=max_i {
            let pumped = pump(s, &decomposition, i)?;
            if !is_member(&pumped, language) {
                found = Some(Witness {
                    decomposition,
                    i,
                    pumped,
                });
                break;
            }
        }

        match found {
            Some(witness) => {
                debug!(%decomposition, i = witness.i, pumped = %witness.pumped, "pumping witness");
                witnesses.push(witness);
            }
            None => {
                debug!(%decomposition, max_i, "decomposition survives pumping");
                return Ok(Refutation::Survives { decomposition });
            }
        }
    }

    Ok(Refutation::Refuted { witnesses })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(x: usize, y: usize, z: usize) -> Decomposition {
        Decomposition::new(x, y, z).unwrap()
    }

    #[test]
    fn test_pump() {
        let split = d(1, 2, 3);
        assert_eq!(pump("aaabbb", &split, 0).unwrap(), "abbb");
        assert_eq!(pump("aaabbb", &split, 1).unwrap(), "aaabbb");
        assert_eq!(pump("aaabbb", &split, 2).unwrap(), "aaaaabbb");
        assert_eq!(pump("aaabbb", &split, 3).unwrap(), "aaaaaaabbb");
    }

    #[test]
    fn test_pump_rejects_mismatched_split() {
        assert!(matches!(
            pump("aaabbb", &d(1, 2, 2), 1),
            Err(FlError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_pump_huge_repeat_count_is_an_error() {
        let split = d(0, 1, 1);
        for i in [usize::MAX, isize::MAX as usize] {
            assert!(matches!(pump("ab", &split, i), Err(FlError::InvalidArgument(_))));
        }
        assert!(matches!(
            evaluate_contradiction("ab", &split, LanguageId::EqualAB, usize::MAX),
            Err(FlError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_evaluate_contradiction_anbn() {
        let split = d(1, 2, 3);
        assert!(!evaluate_contradiction("aaabbb", &split, LanguageId::AnBn, 2).unwrap());
        assert!(!evaluate_contradiction("aaabbb", &split, LanguageId::AnBn, 0).unwrap());
        assert!(evaluate_contradiction("aaabbb", &split, LanguageId::AnBn, 1).unwrap());
    }

    #[test]
    fn test_repeat_count() {
        assert_eq!(repeat_count(4).unwrap(), 4);
        assert!(matches!(repeat_count(-1), Err(FlError::InvalidArgument(_))));
    }

    #[test]
    fn test_explore() {
        let outcomes = explore("aaaaabbbb", &d(3, 2, 4), LanguageId::NGreaterM, 0..=2).unwrap();
        let summary: Vec<_> = outcomes
            .iter()
            .map(|o| (o.i, o.pumped.as_str(), o.in_language))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, "aaabbbb", false),
                (1, "aaaaabbbb", true),
                (2, "aaaaaaabbbb", true),
            ]
        );
    }

    #[test]
    fn test_refute_anbn() {
        let result = refute("aaabbb", LanguageId::AnBn, PumpingLength(3), 2).unwrap();
        let Refutation::Refuted { witnesses } = result else {
            panic!("a^n b^n should be refuted, got {result:?}");
        };
        assert_eq!(witnesses.len(), 6);
        assert!(witnesses.iter().all(|w| w.i == 0));
    }

    #[test]
    fn test_refute_ww() {
        // With p = 2 every split lies inside the first "ab".
        let result = refute("abab", LanguageId::Ww, PumpingLength(2), 3).unwrap();
        assert!(result.is_refuted());
    }

    #[test]
    fn test_refute_n_greater_m_needs_i_zero() {
        let result = refute("aab", LanguageId::NGreaterM, PumpingLength(2), 3).unwrap();
        let Refutation::Refuted { witnesses } = result else {
            panic!("expected refutation");
        };
        // Pumping up only adds a's, so every witness removes y.
        assert_eq!(witnesses.len(), 3);
        assert!(witnesses.iter().all(|w| w.i == 0));
        let two_as = witnesses
            .iter()
            .find(|w| w.decomposition == d(0, 2, 1))
            .unwrap();
        assert_eq!(two_as.pumped, "b");

        // One a to spare: removing a single a keeps n > m.
        let result = refute("aaab", LanguageId::NGreaterM, PumpingLength(2), 3).unwrap();
        assert_eq!(
            result,
            Refutation::Survives {
                decomposition: d(0, 1, 3)
            }
        );
    }

    #[test]
    fn test_refute_survivor() {
        // "ab" pumped as y = "ab" stays in equal_a_b for every i.
        let result = refute("ab", LanguageId::EqualAB, PumpingLength(2), 4).unwrap();
        assert!(!result.is_refuted());
    }

    #[test]
    fn test_refute_argument_errors() {
        assert!(matches!(
            refute("aab", LanguageId::AnBn, PumpingLength(2), 2),
            Err(FlError::NotInLanguage { .. })
        ));
        assert!(matches!(
            refute("ab", LanguageId::AnBn, PumpingLength(0), 2),
            Err(FlError::InvalidArgument(_))
        ));
        assert!(matches!(
            refute("ab", LanguageId::AnBn, PumpingLength(3), 2),
            Err(FlError::InvalidArgument(_))
        ));
    }
}
