//! Property-based tests for membership, pumping and automaton stepping.

use flcore::automaton::{determinize, simulate, simulate_subset};
use flcore::config::demo_table;
use flcore::pumping::{Decomposition, PumpingLength, pump};
use flcore::{LanguageId, is_member};
use proptest::prelude::*;

fn ab_string() -> impl Strategy<Value = String> {
    "[ab]{0,12}"
}

fn binary_string() -> impl Strategy<Value = String> {
    "[01]{0,12}"
}

fn language() -> impl Strategy<Value = LanguageId> {
    prop::sample::select(LanguageId::ALL.to_vec())
}

/// A string with a valid split over it.
fn split_string() -> impl Strategy<Value = (String, Decomposition)> {
    "[ab]{1,12}".prop_flat_map(|s| {
        let len = s.chars().count();
        (0..len).prop_flat_map(move |x_len| {
            let s = s.clone();
            (1..=len - x_len).prop_map(move |y_len| {
                let d = Decomposition::new(x_len, y_len, len - x_len - y_len).unwrap();
                (s.clone(), d)
            })
        })
    })
}

fn count(s: &str, c: char) -> usize {
    s.chars().filter(|&x| x == c).count()
}

proptest! {
    #[test]
    fn prop_pump_identity((s, d) in split_string()) {
        prop_assert_eq!(pump(&s, &d, 1).unwrap(), s);
    }

    #[test]
    fn prop_pump_length((s, d) in split_string(), i in 0usize..6) {
        let pumped = pump(&s, &d, i).unwrap();
        prop_assert_eq!(pumped.len(), d.x_len + d.y_len * i + d.z_len);
        let (x, _, z) = d.split(&s).unwrap();
        prop_assert!(pumped.starts_with(x));
        prop_assert!(pumped.ends_with(z));
    }

    #[test]
    fn prop_equal_a_b(s in ab_string()) {
        prop_assert_eq!(is_member(&s, LanguageId::EqualAB), count(&s, 'a') == count(&s, 'b'));
    }

    #[test]
    fn prop_n_greater_m(s in ab_string()) {
        prop_assert_eq!(is_member(&s, LanguageId::NGreaterM), count(&s, 'a') > count(&s, 'b'));
    }

    #[test]
    fn prop_ww(s in ab_string()) {
        let half = s.len() / 2;
        let expected = s.len() % 2 == 0 && s[..half] == s[half..];
        prop_assert_eq!(is_member(&s, LanguageId::Ww), expected);
    }

    #[test]
    fn prop_anbn_matches_counting_definition(s in ab_string()) {
        let n = count(&s, 'a');
        let expected = s == format!("{}{}", "a".repeat(n), "b".repeat(n));
        prop_assert_eq!(is_member(&s, LanguageId::AnBn), expected);
    }

    #[test]
    fn prop_membership_is_pure(s in ab_string(), lang in language()) {
        prop_assert_eq!(is_member(&s, lang), is_member(&s, lang));
    }

    #[test]
    fn prop_simulate_is_pure(s in binary_string(), allow_epsilon in any::<bool>()) {
        let table = demo_table();
        prop_assert_eq!(simulate(&s, &table, allow_epsilon), simulate(&s, &table, allow_epsilon));
    }

    #[test]
    fn prop_demo_table_never_sticks_on_binary_input(s in binary_string()) {
        let table = demo_table();
        let trace = simulate(&s, &table, false);
        prop_assert!(trace.consumed_all());
        prop_assert_eq!(trace.len(), s.len());
    }

    #[test]
    fn prop_subset_agrees_with_minimal_dfa(s in "[01x]{0,10}") {
        let table = demo_table();
        let minimal = determinize(&table).minimize();
        prop_assert_eq!(simulate_subset(&s, &table).verdict(), minimal.accepts(&s));
    }

    #[test]
    fn prop_leading_split_respects_p(s in "[ab]{1,12}", p in 1usize..5) {
        let d = Decomposition::leading(&s, PumpingLength(p)).unwrap();
        prop_assert!(d.validate(&s, Some(PumpingLength(p))).is_ok());
    }
}
