//! Raw query-string handling.
//!
//! `QueryParams` keeps values exactly as they appear on the wire (still
//! percent-encoded). The codec decides how each parameter is split and
//! decoded, which lets list parameters split on literal commas before the
//! elements are decoded.

use std::borrow::Cow;

/// Ordered `key=value` pairs of a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string (with or without the leading `?`). Never fails:
    /// empty segments are skipped and a missing `=` yields an empty value.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                (decode_component(key).into_owned(), value.to_string())
            })
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { pairs }
    }

    /// Raw (still encoded) value; the last occurrence of a key wins.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Decoded value; the last occurrence of a key wins.
    pub fn get(&self, key: &str) -> Option<String> {
        self.get_raw(key).map(|v| decode_component(v).into_owned())
    }

    /// Decoded elements of a comma-separated list parameter, empty elements
    /// dropped.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get_raw(key)
            .map(|raw| {
                raw.split(',')
                    .map(|part| decode_component(part).into_owned())
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Append a plain value, percent-encoding it.
    pub fn push(&mut self, key: &str, value: &str) {
        self.pairs.push((key.to_string(), urlencoding::encode(value).into_owned()));
    }

    /// Append a list value: each element percent-encoded, joined with `,`.
    pub fn push_list<'a>(&mut self, key: &str, values: impl IntoIterator<Item = &'a String>) {
        let joined = values
            .into_iter()
            .map(|v| urlencoding::encode(v).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        self.pairs.push((key.to_string(), joined));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    /// Render without a leading `?`; empty when there are no parameters.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl core::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Percent-decode one component, treating `+` as a space. Invalid UTF-8 is
/// replaced rather than rejected.
fn decode_component(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['%', '+']) {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}
