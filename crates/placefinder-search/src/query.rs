//! Query tokenization with US state abbreviation expansion.

use placefinder_core::ValidationError;

/// Two-letter postal codes of the 50 states plus DC.
const US_STATES: &[(&str, &str)] = &[
    ("al", "alabama"),
    ("ak", "alaska"),
    ("az", "arizona"),
    ("ar", "arkansas"),
    ("ca", "california"),
    ("co", "colorado"),
    ("ct", "connecticut"),
    ("de", "delaware"),
    ("dc", "district of columbia"),
    ("fl", "florida"),
    ("ga", "georgia"),
    ("hi", "hawaii"),
    ("id", "idaho"),
    ("il", "illinois"),
    ("in", "indiana"),
    ("ia", "iowa"),
    ("ks", "kansas"),
    ("ky", "kentucky"),
    ("la", "louisiana"),
    ("me", "maine"),
    ("md", "maryland"),
    ("ma", "massachusetts"),
    ("mi", "michigan"),
    ("mn", "minnesota"),
    ("ms", "mississippi"),
    ("mo", "missouri"),
    ("mt", "montana"),
    ("ne", "nebraska"),
    ("nv", "nevada"),
    ("nh", "new hampshire"),
    ("nj", "new jersey"),
    ("nm", "new mexico"),
    ("ny", "new york"),
    ("nc", "north carolina"),
    ("nd", "north dakota"),
    ("oh", "ohio"),
    ("ok", "oklahoma"),
    ("or", "oregon"),
    ("pa", "pennsylvania"),
    ("ri", "rhode island"),
    ("sc", "south carolina"),
    ("sd", "south dakota"),
    ("tn", "tennessee"),
    ("tx", "texas"),
    ("ut", "utah"),
    ("vt", "vermont"),
    ("va", "virginia"),
    ("wa", "washington"),
    ("wv", "west virginia"),
    ("wi", "wisconsin"),
    ("wy", "wyoming"),
];

/// Full lower-case name for a two-letter state code, if it is one.
#[must_use]
pub fn state_name(code: &str) -> Option<&'static str> {
    US_STATES
        .iter()
        .find(|(abbr, _)| *abbr == code)
        .map(|(_, name)| *name)
}

/// Normalizes a free-text query into unique search tokens.
///
/// Lower-cases the text, treats every run of characters outside ASCII
/// `[a-z0-9]` as a separator, and follows each state code with the words of
/// its full name: `"NJ pizza!!"` becomes `["nj", "new", "jersey", "pizza"]`.
/// Tokens keep the order of their first occurrence.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidQuery`] if the query is blank or holds
/// nothing but separators.
pub fn normalize_search_query(query: &str) -> Result<Vec<String>, ValidationError> {
    if query.trim().is_empty() {
        return Err(ValidationError::InvalidQuery(
            "search query cannot be empty".to_owned(),
        ));
    }

    let mut tokens = Vec::new();
    for token in tokenize(query) {
        let expansion = state_name(&token);
        push_unique(&mut tokens, token);
        if let Some(name) = expansion {
            for word in name.split(' ') {
                push_unique(&mut tokens, word.to_owned());
            }
        }
    }

    if tokens.is_empty() {
        return Err(ValidationError::InvalidQuery(format!(
            "search query has no searchable terms: '{query}'"
        )));
    }
    Ok(tokens)
}

/// Splits `text` into lower-case ASCII alphanumeric runs. No state
/// expansion. Any other character, accented letters included, separates.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

fn push_unique(tokens: &mut Vec<String>, token: String) {
    if !tokens.contains(&token) {
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_table_covers_fifty_states_and_dc() {
        assert_eq!(US_STATES.len(), 51);
        assert_eq!(state_name("dc"), Some("district of columbia"));
        assert_eq!(state_name("zz"), None);
    }

    #[test]
    fn expands_state_codes_and_strips_punctuation() {
        assert_eq!(
            normalize_search_query("NJ pizza!!").unwrap(),
            vec!["nj", "new", "jersey", "pizza"]
        );
    }

    #[test]
    fn removes_duplicates_keeping_first_occurrence() {
        assert_eq!(
            normalize_search_query("new NY pizza, Pizza").unwrap(),
            vec!["new", "ny", "york", "pizza"]
        );
    }

    #[test]
    fn collapses_runs_of_separators() {
        assert_eq!(
            normalize_search_query("  coffee---shop//24h ").unwrap(),
            vec!["coffee", "shop", "24h"]
        );
    }

    #[test]
    fn rejects_blank_query() {
        assert!(matches!(
            normalize_search_query("   "),
            Err(ValidationError::InvalidQuery(_))
        ));
    }

    #[test]
    fn rejects_punctuation_only_query() {
        assert!(matches!(
            normalize_search_query("?!"),
            Err(ValidationError::InvalidQuery(_))
        ));
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        assert_eq!(tokenize("Café Olé"), vec!["caf", "ol"]);
        assert_eq!(
            normalize_search_query("Crème brûlée").unwrap(),
            vec!["cr", "me", "br", "l", "e"]
        );
    }

    #[test]
    fn tokenize_does_not_expand_states() {
        assert_eq!(
            tokenize("Accessible park in NJ"),
            vec!["accessible", "park", "in", "nj"]
        );
        assert!(tokenize("").is_empty());
    }
}
