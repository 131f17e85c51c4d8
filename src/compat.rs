//! Plug and voltage compatibility between two countries.
//!
//! Both checks are plain set intersections:
//!
//! - **Plugs**: compatible when the two plug-type sets share at least one tag.
//!   A single shared type is enough, whatever else differs.
//! - **Voltage**: every maximal run of ASCII digits in each voltage text is
//!   read as an integer; compatible when the two number sets share a value.
//!
//! The voltage check is token matching, not range arithmetic. `"220-240 V"`
//! yields `{220, 240}`, so it does not match `"230 V"` even though 230 lies
//! inside the range. Text with no digits yields an empty set and is never
//! compatible with anything.

use crate::route::CountryPair;
use serde::Serialize;
use std::collections::BTreeSet;

/// Outcome of comparing an origin and a destination profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompatibilityResult {
    pub plug_compatible: bool,
    pub voltage_compatible: bool,
}

impl CompatibilityResult {
    /// Compare the two sides of a resolved pair.
    pub fn between(pair: &CountryPair<'_>) -> Self {
        Self {
            plug_compatible: plugs_compatible(&pair.origin.plugs, &pair.destination.plugs),
            voltage_compatible: voltage_compatible(
                &pair.origin.voltage,
                &pair.destination.voltage,
            ),
        }
    }

    /// A physical adapter is needed when no plug type is shared.
    pub fn needs_adapter(&self) -> bool {
        !self.plug_compatible
    }
}

/// True iff the two plug sets intersect.
pub fn plugs_compatible<S: AsRef<str>>(a: &[S], b: &[S]) -> bool {
    let a: BTreeSet<&str> = a.iter().map(AsRef::as_ref).collect();
    b.iter().any(|plug| a.contains(plug.as_ref()))
}

/// True iff the numeric tokens of the two voltage specs intersect.
pub fn voltage_compatible(a: &str, b: &str) -> bool {
    let a = voltage_tokens(a);
    let b = voltage_tokens(b);
    !a.is_disjoint(&b)
}

/// Extract every maximal digit run as a number.
///
/// Tokens are kept as canonical decimal strings (leading zeros stripped) so a
/// run of any length compares by integer value without overflowing.
pub fn voltage_tokens(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| {
            let trimmed = run.trim_start_matches('0');
            let token = if trimmed.is_empty() { "0" } else { trimmed };
            token.to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{pair, profile};

    fn tokens(text: &str) -> Vec<String> {
        voltage_tokens(text).into_iter().collect()
    }

    // =========================================================================
    // Plugs
    // =========================================================================

    #[test]
    fn disjoint_plugs_need_adapter() {
        assert!(!plugs_compatible(&["C", "F"], &["G"]));
    }

    #[test]
    fn one_shared_plug_is_enough() {
        assert!(plugs_compatible(&["A", "B"], &["A"]));
    }

    #[test]
    fn self_plugs_always_compatible() {
        let plugs = ["C", "E", "F"];
        assert!(plugs_compatible(&plugs, &plugs));
    }

    #[test]
    fn plug_check_is_symmetric() {
        let cases: [(&[&str], &[&str]); 3] = [
            (&["C", "F"], &["G"]),
            (&["A", "B"], &["A"]),
            (&["I"], &["C", "I"]),
        ];
        for (a, b) in cases {
            assert_eq!(plugs_compatible(a, b), plugs_compatible(b, a));
        }
    }

    #[test]
    fn empty_plug_set_matches_nothing() {
        let empty: [&str; 0] = [];
        assert!(!plugs_compatible(&empty, &["A"]));
    }

    #[test]
    fn plug_tags_are_case_sensitive() {
        assert!(!plugs_compatible(&["a"], &["A"]));
    }

    // =========================================================================
    // Voltage
    // =========================================================================

    #[test]
    fn tokens_single_value() {
        assert_eq!(tokens("230 V"), vec!["230"]);
    }

    #[test]
    fn tokens_range() {
        assert_eq!(tokens("220-240 V"), vec!["220", "240"]);
    }

    #[test]
    fn tokens_no_digits_is_empty() {
        assert!(voltage_tokens("desconocido").is_empty());
    }

    #[test]
    fn tokens_strip_leading_zeros() {
        assert_eq!(tokens("0230 V / 000"), vec!["0", "230"]);
    }

    #[test]
    fn tokens_long_runs_do_not_overflow() {
        let text = "123456789012345678901234567890 V";
        assert_eq!(tokens(text), vec!["123456789012345678901234567890"]);
    }

    #[test]
    fn us_to_europe_range_incompatible() {
        assert!(!voltage_compatible("120 V", "220-240 V"));
    }

    #[test]
    fn range_does_not_contain_inner_value() {
        assert!(!voltage_compatible("220-240 V", "230 V"));
    }

    #[test]
    fn shared_endpoint_is_compatible() {
        assert!(voltage_compatible("220-240 V", "240 V"));
    }

    #[test]
    fn same_voltage_compatible() {
        assert!(voltage_compatible("230 V", "230V"));
    }

    #[test]
    fn malformed_voltage_never_compatible() {
        assert!(!voltage_compatible("n/a", "n/a"));
    }

    #[test]
    fn voltage_check_is_symmetric() {
        let cases = [
            ("120 V", "220-240 V"),
            ("100-127 V", "127 V"),
            ("230 V", "n/a"),
        ];
        for (a, b) in cases {
            assert_eq!(voltage_compatible(a, b), voltage_compatible(b, a));
        }
    }

    // =========================================================================
    // CompatibilityResult
    // =========================================================================

    #[test]
    fn result_between_pair() {
        let es = profile("ES", "España", &["C", "F"], "230 V");
        let gb = profile("GB", "Reino Unido", &["G"], "230 V");
        let result = CompatibilityResult::between(&pair(&es, &gb));
        assert!(!result.plug_compatible);
        assert!(result.voltage_compatible);
        assert!(result.needs_adapter());
    }

    #[test]
    fn voltage_does_not_affect_adapter_verdict() {
        let us = profile("US", "Estados Unidos", &["A", "B"], "120 V");
        let jp = profile("JP", "Japón", &["A"], "100 V");
        let result = CompatibilityResult::between(&pair(&us, &jp));
        assert!(!result.needs_adapter());
        assert!(!result.voltage_compatible);
    }

    #[test]
    fn self_pair_fully_compatible() {
        let fr = profile("FR", "Francia", &["C", "E"], "230 V");
        let result = CompatibilityResult::between(&pair(&fr, &fr));
        assert!(result.plug_compatible);
        assert!(result.voltage_compatible);
    }
}
