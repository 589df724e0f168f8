//! Value sanitizers.
//!
//! Each sanitizer takes a candidate value and a default and never fails:
//! anything out of domain resolves to the default. The `parse_*` helpers
//! underneath return `None` on rejection so the resolver can tell a
//! rejected override apart from an absent one.

use reqwest::Url;

use crate::schema::ParameterKind;
use crate::types::{OptionValue, RawValue, ServerContext};

const TRUE_WORDS: &[&str] = &["true", "yes", "y"];
const FALSE_WORDS: &[&str] = &["false", "no", "n"];

/// Multiselect delimiters: `|` in templates, `-` as the player writes lists.
const LIST_SEPARATORS: [char; 2] = ['|', '-'];

/// Parse a boolean word, case-insensitively.
pub fn parse_bool(value: &str) -> Option<bool> {
    let lowered = value.to_lowercase();
    if TRUE_WORDS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Normalize a hex colour: strip `#`, expand `abc` to `aabbcc`.
///
/// Accepts only a result of exactly six hex digits.
pub fn parse_hex(value: &str) -> Option<String> {
    let value = value.strip_prefix('#').unwrap_or(value);
    let expanded: String = if value.chars().count() == 3 {
        value.chars().flat_map(|c| [c, c]).collect()
    } else {
        value.to_string()
    };
    (expanded.len() == 6 && expanded.chars().all(|c| c.is_ascii_hexdigit())).then_some(expanded)
}

/// Parse a string made entirely of ASCII digits.
pub fn parse_int(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Boolean sanitizer.
pub fn sanitize_bool(value: &RawValue, default: bool) -> bool {
    accept_bool(value).unwrap_or(default)
}

/// Hex colour sanitizer.
pub fn sanitize_hex(value: &RawValue, default: &str) -> String {
    accept_hex(value).unwrap_or_else(|| default.to_string())
}

/// Non-negative integer sanitizer.
pub fn sanitize_int(value: &RawValue, default: Option<u64>) -> Option<u64> {
    accept_int(value).or(default)
}

/// Enumerated-value sanitizer.
pub fn sanitize_list(value: &RawValue, default: &str, values: &[String]) -> String {
    accept_list(value, values).unwrap_or_else(|| default.to_string())
}

/// Multi-select sanitizer.
///
/// Splits a `|` or `-` delimited string (or takes a pre-split list) and keeps the
/// tokens that are allowed, in the order the caller gave them, without
/// duplicates. An empty intersection yields the default.
pub fn sanitize_multiselect(value: &RawValue, default: &[String], values: &[String]) -> Vec<String> {
    accept_multiselect(value, values).unwrap_or_else(|| default.to_vec())
}

/// URL sanitizer.
///
/// Empty input yields an empty string. Absolute URLs (containing `://`) are
/// kept as given; anything else is resolved against the request: a leading
/// `/` is relative to the host root, otherwise to the current page's
/// directory (the request path without its query or fragment). The result
/// must parse as a URL, or the default is returned.
pub fn sanitize_url(value: &RawValue, default: &str, context: &ServerContext) -> String {
    accept_url(value, context).unwrap_or_else(|| default.to_string())
}

/// Run the sanitizer for `kind`, returning `None` if the candidate is rejected.
pub(crate) fn accept(
    kind: &ParameterKind,
    value: &RawValue,
    context: &ServerContext,
) -> Option<OptionValue> {
    match kind {
        ParameterKind::Bool { .. } => accept_bool(value).map(OptionValue::Bool),
        ParameterKind::Hex { .. } => accept_hex(value).map(OptionValue::Str),
        ParameterKind::Int { .. } => accept_int(value).map(OptionValue::Int),
        ParameterKind::List { values, .. } => accept_list(value, values).map(OptionValue::Str),
        ParameterKind::MultiSelect { values, .. } => {
            accept_multiselect(value, values).map(OptionValue::List)
        }
        ParameterKind::Url { .. } => accept_url(value, context).map(OptionValue::Str),
        ParameterKind::String { .. } => accept_string(value).map(OptionValue::Str),
    }
}

fn accept_bool(value: &RawValue) -> Option<bool> {
    match value {
        RawValue::Bool(b) => Some(*b),
        RawValue::Str(s) => parse_bool(s),
        _ => None,
    }
}

fn accept_hex(value: &RawValue) -> Option<String> {
    value.as_str().and_then(parse_hex)
}

fn accept_int(value: &RawValue) -> Option<u64> {
    match value {
        RawValue::Int(i) => u64::try_from(*i).ok(),
        RawValue::Str(s) => parse_int(s),
        _ => None,
    }
}

fn accept_list(value: &RawValue, values: &[String]) -> Option<String> {
    value
        .as_str()
        .filter(|s| values.iter().any(|v| v == s))
        .map(str::to_string)
}

fn accept_multiselect(value: &RawValue, values: &[String]) -> Option<Vec<String>> {
    let tokens: Vec<&str> = match value {
        RawValue::Str(s) => s.split(LIST_SEPARATORS).collect(),
        RawValue::List(items) => items.iter().map(String::as_str).collect(),
        _ => return None,
    };
    let mut selected: Vec<String> = Vec::new();
    for token in tokens {
        if values.iter().any(|v| v == token) && !selected.iter().any(|s| s == token) {
            selected.push(token.to_string());
        }
    }
    (!selected.is_empty()).then_some(selected)
}

fn accept_url(value: &RawValue, context: &ServerContext) -> Option<String> {
    let raw = value.as_str()?;
    if raw.is_empty() {
        return Some(String::new());
    }
    let absolute = absolutize(raw, context);
    Url::parse(&absolute).ok().map(|_| absolute)
}

fn accept_string(value: &RawValue) -> Option<String> {
    match value {
        RawValue::Str(s) => Some(s.clone()),
        RawValue::Int(i) => Some(i.to_string()),
        RawValue::Bool(_) | RawValue::List(_) => None,
    }
}

/// Resolve a possibly-relative URL against the request context.
fn absolutize(url: &str, context: &ServerContext) -> String {
    if url.contains("://") {
        return url.to_string();
    }
    let base = context.base_url();
    if url.starts_with('/') {
        return format!("{base}{url}");
    }
    let path = context
        .request_uri
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let mut page = format!("{base}{path}");
    if !page.ends_with('/') {
        page.push('/');
    }
    page.push_str(url);
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_expands_before_checking() {
        assert_eq!(parse_hex("#AbC").as_deref(), Some("AAbbCC"));
    }

    #[test]
    fn int_rejects_overflow() {
        assert_eq!(parse_int("99999999999999999999999"), None);
    }

    #[test]
    fn absolutize_joins_page_directory() {
        let ctx = ServerContext::new("example.com").request_uri("/videos");
        assert_eq!(absolutize("badge.png", &ctx), "http://example.com/videos/badge.png");
        assert_eq!(absolutize("/badge.png", &ctx), "http://example.com/badge.png");
    }

    #[test]
    fn absolutize_ignores_request_query_and_fragment() {
        let ctx = ServerContext::new("example.com").request_uri("/a/b?q=1");
        assert_eq!(absolutize("x.png", &ctx), "http://example.com/a/b/x.png");
        let ctx = ServerContext::new("example.com").request_uri("/a/#top");
        assert_eq!(absolutize("x.png", &ctx), "http://example.com/a/x.png");
    }
}
