//! Search query intake from a location query string.

use url::form_urlencoded;

/// URL parameter holding the notes search query.
pub const SEARCH_PARAM: &str = "search";

/// Extracts the decoded `search` parameter from a query string.
///
/// Accepts the string with or without a leading `?`. Returns `None` when the
/// parameter is absent; the first occurrence wins.
pub fn search_query_from_url(query_string: &str) -> Option<String> {
    form_urlencoded::parse(query_string.trim_start_matches('?').as_bytes())
        .find(|(name, _)| name == SEARCH_PARAM)
        .map(|(_, value)| value.into_owned())
}
