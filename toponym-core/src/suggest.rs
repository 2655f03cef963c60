use tracing::debug;

use crate::error::GazetteerUnavailable;
use crate::gazetteer::{Gazetteer, GazetteerSource};
use crate::search::SearchTerm;
use crate::{NO_SUGGESTION, SUGGESTION_LIMIT};

/// Up to [`SUGGESTION_LIMIT`] canonical names closest to `raw`, best first.
///
/// Queries without usable content yield `["No suggestion."]`.
pub fn suggest(raw: Option<&str>, gazetteer: &Gazetteer) -> Vec<String> {
    match SearchTerm::from_raw_query(raw) {
        Ok(term) => suggest_term(&term, gazetteer, SUGGESTION_LIMIT),
        Err(_) => {
            debug!("No signal in {raw:?}");
            vec![NO_SUGGESTION.to_string()]
        }
    }
}

/// Ranked comparison forms for `term` with the query's suffix reattached.
pub fn suggest_term(term: &SearchTerm, gazetteer: &Gazetteer, limit: usize) -> Vec<String> {
    gazetteer
        .rank(term)
        .into_iter()
        .take(limit)
        .filter_map(|r| gazetteer.get(r.index))
        .map(|entry| format!("{}{}", entry.comparison, term.suffix))
        .collect()
}

/// Loads (or reuses) the gazetteer behind `source` and suggests for `raw`.
///
/// The gazetteer is not touched at all for queries without signal.
pub fn suggest_from_source(
    raw: Option<&str>,
    source: &GazetteerSource,
) -> Result<Vec<String>, GazetteerUnavailable> {
    match SearchTerm::from_raw_query(raw) {
        Ok(term) => {
            let gazetteer = Gazetteer::load(source)?;
            Ok(suggest_term(&term, &gazetteer, SUGGESTION_LIMIT))
        }
        Err(_) => Ok(vec![NO_SUGGESTION.to_string()]),
    }
}
