//! Embed renderers.
//!
//! Each renderer consumes a finished [`ResolvedOptions`] and the video it
//! belongs to, and produces markup. Booleans become the literal strings
//! `true`/`false` only here, at the output boundary.

pub mod analytics;
pub mod api;
pub mod iframe;
pub mod popover;
pub mod socialbar;

use crate::options::ResolvedOptions;
use crate::schema::GENERAL;
use crate::types::{EmbedType, VideoRecord};
use crate::{EmbedError, Result};

pub(crate) const DEFAULT_WIDTH: u64 = 640;
pub(crate) const DEFAULT_HEIGHT: u64 = 360;

/// Render the embed selected by the resolved `type` option.
pub fn render(video: &VideoRecord, options: &ResolvedOptions) -> Result<String> {
    match options.embed_type() {
        EmbedType::Iframe => iframe::render(video, options),
        EmbedType::Api => api::render(video, options),
        EmbedType::Popover => popover::render(video, options),
    }
}

/// Hashed ids end up in URLs and script identifiers, so only ASCII
/// alphanumerics are allowed.
pub(crate) fn check_hashed_id(hashed_id: &str) -> Result<()> {
    if hashed_id.is_empty() || !hashed_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(EmbedError::InvalidInput(format!(
            "hashed id '{hashed_id}' is not alphanumeric"
        )));
    }
    Ok(())
}

/// `http` or `https`, following the resolved `ssl` option.
pub(crate) fn scheme(options: &ResolvedOptions) -> &'static str {
    if options.bool(GENERAL, "ssl").unwrap_or(false) {
        "https"
    } else {
        "http"
    }
}

pub(crate) fn video_width(options: &ResolvedOptions) -> u64 {
    options.int(GENERAL, "videoWidth").unwrap_or(DEFAULT_WIDTH)
}

pub(crate) fn video_height(options: &ResolvedOptions) -> u64 {
    options.int(GENERAL, "videoHeight").unwrap_or(DEFAULT_HEIGHT)
}

/// Escape text for an HTML attribute or text node.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape text for a single- or double-quoted JavaScript string literal.
///
/// `<` is escaped too so a value can never close the surrounding `<script>`.
pub fn escape_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\u003c"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escaping() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#039;");
    }

    #[test]
    fn js_escaping_cannot_close_script() {
        assert_eq!(escape_js("</script>"), "\\u003c/script>");
        assert_eq!(escape_js("it's"), "it\\'s");
    }
}
