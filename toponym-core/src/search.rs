use tracing::debug;

use crate::error::NoSignal;
use crate::{normalize, NOT_SPECIFIED, SUFFIXES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    pub raw: String,
    /// Folded, substituted and suffix-free form compared against the gazetteer.
    pub normalized: String,
    /// Suffix removed from the query, reattached to every suggestion.
    pub suffix: &'static str,
}

impl SearchTerm {
    pub fn from_raw_query(raw: Option<&str>) -> Result<Self, NoSignal> {
        let raw = match raw.map(str::trim) {
            None | Some("") | Some(NOT_SPECIFIED) => return Err(NoSignal),
            Some(r) if !r.chars().any(char::is_alphabetic) => return Err(NoSignal),
            Some(r) => r,
        };
        let folded = normalize(raw);
        let (core, suffix) = strip_suffix(&folded);
        debug!("Query {raw:?} normalized to {core:?} (suffix {suffix:?})");
        Ok(SearchTerm {
            raw: raw.to_string(),
            normalized: core.to_string(),
            suffix,
        })
    }
}

/// Removes the first suffix of [`SUFFIXES`] that `s` ends with.
pub fn strip_suffix(s: &str) -> (&str, &'static str) {
    SUFFIXES
        .iter()
        .find_map(|&suffix| s.strip_suffix(suffix).map(|core| (core, suffix)))
        .unwrap_or((s, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(raw: &str) -> SearchTerm {
        SearchTerm::from_raw_query(Some(raw)).expect("query has signal")
    }

    #[test]
    fn degenerate_queries_have_no_signal() {
        for raw in [None, Some(""), Some("   "), Some("Not specified"), Some("12345")] {
            assert_eq!(SearchTerm::from_raw_query(raw), Err(NoSignal), "{raw:?}");
        }
        assert_eq!(SearchTerm::from_raw_query(Some("-- 00/99 --")), Err(NoSignal));
    }

    #[test]
    fn non_ascii_letters_count_as_signal() {
        assert_eq!(term("Şam").normalized, "sam");
        assert_eq!(term("İ").normalized, "i");
    }

    #[test]
    fn strips_known_suffix() {
        let st = term("Edirne Vilayeti");
        assert_eq!(st.normalized, "edirne");
        assert_eq!(st.suffix, " vilayeti");
        assert_eq!(st.raw, "Edirne Vilayeti");
    }

    #[test]
    fn suffix_is_matched_after_substitution() {
        let st = term("Yeniköy Köyü");
        assert_eq!(st.normalized, "yenikoy");
        assert_eq!(st.suffix, " koyu");
        let st = term("Ertuğrul Sancağı");
        assert_eq!(st.normalized, "ertugrul");
        assert_eq!(st.suffix, " sancagi");
    }

    #[test]
    fn trailing_whitespace_does_not_hide_suffix() {
        let st = term("  Akçehisar kazâsı \n");
        assert_eq!(st.normalized, "akcehisar");
        assert_eq!(st.suffix, " kazasi");
    }

    #[test]
    fn first_declared_suffix_wins() {
        assert_eq!(strip_suffix("manastir kazasi"), ("manastir", " kazasi"));
        assert_eq!(strip_suffix("manastir kaza"), ("manastir", " kaza"));
        // only one suffix is ever removed
        assert_eq!(
            strip_suffix("bolu sancagi kazasi"),
            ("bolu sancagi", " kazasi")
        );
    }

    #[test]
    fn suffix_needs_a_leading_space() {
        assert_eq!(strip_suffix("kaza"), ("kaza", ""));
        assert_eq!(strip_suffix("karakaza"), ("karakaza", ""));
        assert_eq!(term("Konya").suffix, "");
    }
}
