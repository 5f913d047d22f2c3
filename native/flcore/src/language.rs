//! Membership predicates for the named languages over `{a, b}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlError;

/// A target language, identified by its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageId {
    /// `{ w | #a(w) = #b(w) }`
    #[serde(rename = "equal_a_b")]
    EqualAB,
    /// `{ a^n b^m | n > m }`, checked as `#a(w) > #b(w)`
    #[serde(rename = "n_greater_m")]
    NGreaterM,
    /// `{ a^n b^n | n >= 0 }`
    #[serde(rename = "anbn")]
    AnBn,
    /// `{ ww | w in {a,b}* }`
    #[serde(rename = "ww")]
    Ww,
}

impl LanguageId {
    pub const ALL: [LanguageId; 4] = [
        LanguageId::EqualAB,
        LanguageId::NGreaterM,
        LanguageId::AnBn,
        LanguageId::Ww,
    ];

    /// Stable identifier used in JSON and by the Python bindings.
    pub fn tag(self) -> &'static str {
        match self {
            LanguageId::EqualAB => "equal_a_b",
            LanguageId::NGreaterM => "n_greater_m",
            LanguageId::AnBn => "anbn",
            LanguageId::Ww => "ww",
        }
    }

    /// Set-builder definition shown next to a problem.
    pub fn definition(self) -> &'static str {
        match self {
            LanguageId::EqualAB => "L = { w | w has equal number of a's and b's }",
            LanguageId::NGreaterM => "L = { a^n b^m | n > m }",
            LanguageId::AnBn => "L = { a^n b^n | n ≥ 0 }",
            LanguageId::Ww => "L = { ww | w ∈ {a,b}* }",
        }
    }

    /// Same as [`is_member`].
    pub fn contains(self, s: &str) -> bool {
        is_member(s, self)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LanguageId {
    type Err = FlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageId::ALL
            .into_iter()
            .find(|lang| lang.tag() == s)
            .ok_or_else(|| FlError::UnknownLanguage(s.to_string()))
    }
}

/// Decide whether `s` belongs to `language`. Total over all inputs.
pub fn is_member(s: &str, language: LanguageId) -> bool {
    match language {
        LanguageId::EqualAB => count(s, 'a') == count(s, 'b'),
        LanguageId::NGreaterM => count(s, 'a') > count(s, 'b'),
        LanguageId::AnBn => match halves(s) {
            Some((front, back)) => front.iter().all(|&c| c == 'a') && back.iter().all(|&c| c == 'b'),
            None => false,
        },
        LanguageId::Ww => match halves(s) {
            Some((front, back)) => front == back,
            None => false,
        },
    }
}

/// Like [`is_member`], but keyed by tag. Unknown tags are never members.
pub fn is_member_tag(s: &str, tag: &str) -> bool {
    tag.parse::<LanguageId>()
        .map(|language| is_member(s, language))
        .unwrap_or(false)
}

fn count(s: &str, symbol: char) -> usize {
    s.chars().filter(|&c| c == symbol).count()
}

/// Split into two equal halves, or `None` for odd lengths.
fn halves(s: &str) -> Option<(Vec<char>, Vec<char>)> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() % 2 != 0 {
        return None;
    }
    let back = chars[chars.len() / 2..].to_vec();
    let mut front = chars;
    front.truncate(front.len() / 2);
    Some((front, back))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_a_b() {
        assert!(is_member("", LanguageId::EqualAB));
        assert!(is_member("abba", LanguageId::EqualAB));
        assert!(is_member("baab", LanguageId::EqualAB));
        assert!(!is_member("aab", LanguageId::EqualAB));
    }

    #[test]
    fn test_n_greater_m() {
        assert!(!is_member("", LanguageId::NGreaterM));
        assert!(is_member("aab", LanguageId::NGreaterM));
        assert!(is_member("aaaab", LanguageId::NGreaterM));
        assert!(!is_member("ab", LanguageId::NGreaterM));
        assert!(!is_member("aabb", LanguageId::NGreaterM));
    }

    #[test]
    fn test_anbn() {
        assert!(is_member("", LanguageId::AnBn));
        assert!(is_member("ab", LanguageId::AnBn));
        assert!(is_member("aabb", LanguageId::AnBn));
        assert!(is_member("aaabbb", LanguageId::AnBn));
        assert!(!is_member("abb", LanguageId::AnBn));
        assert!(!is_member("abab", LanguageId::AnBn));
        assert!(!is_member("ba", LanguageId::AnBn));
        assert!(!is_member("aaaaabbb", LanguageId::AnBn));
        assert!(!is_member("abbb", LanguageId::AnBn));
    }

    #[test]
    fn test_ww() {
        assert!(is_member("", LanguageId::Ww));
        assert!(is_member("abab", LanguageId::Ww));
        assert!(is_member("aa", LanguageId::Ww));
        assert!(!is_member("aba", LanguageId::Ww));
        assert!(!is_member("abba", LanguageId::Ww));
    }

    #[test]
    fn test_tags() {
        for lang in LanguageId::ALL {
            assert_eq!(lang.tag().parse::<LanguageId>().unwrap(), lang);
            assert_eq!(lang.to_string(), lang.tag());
        }
        assert!(matches!(
            "palindrome".parse::<LanguageId>(),
            Err(FlError::UnknownLanguage(_))
        ));
        assert!(is_member_tag("aabb", "anbn"));
        assert!(!is_member_tag("", "palindrome"));
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&LanguageId::NGreaterM).unwrap();
        assert_eq!(json, "\"n_greater_m\"");
        let back: LanguageId = serde_json::from_str("\"ww\"").unwrap();
        assert_eq!(back, LanguageId::Ww);
    }
}
