//! Relevance scoring of catalog places against normalized query tokens.

use placefinder_core::CatalogPlace;

use crate::query::tokenize;

/// Scores `place` against query `tokens`.
///
/// Looks at the address, name, and description in that order, skipping
/// absent ones. Each field earns one point per query token that is a
/// substring of any of the field's tokens, and field scores are summed, so
/// a token found in all three fields counts three times.
#[must_use]
pub fn compute_search_match_score(tokens: &[String], place: &CatalogPlace) -> u32 {
    [
        place.location.address.as_deref(),
        place.name.as_deref(),
        place.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(|text| field_score(tokens, &tokenize(text)))
    .sum()
}

fn field_score(tokens: &[String], field_tokens: &[String]) -> u32 {
    let hits = tokens
        .iter()
        .filter(|token| field_tokens.iter().any(|f| f.contains(token.as_str())))
        .count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}
