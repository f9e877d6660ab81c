//! Query-string parsing.

use std::collections::HashMap;

/// Parses a raw query string (without the leading `?`) into a key/value map.
///
/// Pairs are separated by `&`, key and value by the first `=`. A pair with no
/// `=` maps the whole pair to the empty string. When a key repeats, the last
/// occurrence wins. Values are kept raw; there is no percent-decoding.
///
/// ```
/// use tasklite::http::query::parse_query;
///
/// let parsed = parse_query("title=laundry&description=");
/// assert_eq!(parsed.get("title").map(String::as_str), Some("laundry"));
/// assert_eq!(parsed.get("description").map(String::as_str), Some(""));
/// ```
pub fn parse_query(raw: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in raw.split('&') {
        if pair.is_empty() {
            continue;
        }
        match pair.split_once('=') {
            Some((key, value)) => params.insert(key.to_string(), value.to_string()),
            None => params.insert(pair.to_string(), String::new()),
        };
    }
    params
}
