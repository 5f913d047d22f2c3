//! Language-theoretic core for formal-language visualizers: language
//! membership, automaton stepping and the pumping lemma.

pub mod automaton;
pub mod config;
pub mod error;
pub mod grammar;
pub mod language;
pub mod pumping;

#[cfg(feature = "python")]
mod python;

pub use error::{FlError, Result};
pub use language::{LanguageId, is_member, is_member_tag};
pub use pumping::{Decomposition, PumpingLength, evaluate_contradiction, pump};
