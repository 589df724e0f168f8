//! Iframe embed: every option travels in the iframe URL's query string.

use reqwest::Url;

use super::{check_hashed_id, escape_html, scheme, video_height, video_width};
use crate::options::ResolvedOptions;
use crate::schema::{GENERAL, SOCIALBAR};
use crate::types::VideoRecord;
use crate::{EmbedError, Result};

/// Extra iframe height taken by the social bar.
const SOCIALBAR_HEIGHT: u64 = 28;
/// Further height when the buttons wrap onto a second row.
const SOCIALBAR_WRAP_HEIGHT: u64 = 34;
/// Button count above which the social bar wraps.
const SOCIALBAR_WRAP_AFTER: usize = 5;

/// Build the player iframe URL for `hashed_id`.
///
/// The query carries all general options plus `version=v1`, and social bar
/// options as `plugin[socialbar-v1][<option>]`. Spaces are encoded as `%20`.
pub fn iframe_url(hashed_id: &str, options: &ResolvedOptions) -> Result<String> {
    check_hashed_id(hashed_id)?;

    let base = format!(
        "{}://fast.wistia.net/embed/iframe/{hashed_id}",
        scheme(options)
    );
    let mut url = Url::parse(&base)
        .map_err(|e| EmbedError::InvalidInput(format!("bad iframe URL {base}: {e}")))?;

    {
        let mut query = url.query_pairs_mut();
        if let Some(general) = options.group(GENERAL) {
            for (name, value) in general {
                query.append_pair(name, &value.to_query_string());
            }
        }
        query.append_pair("version", "v1");
        if let Some(socialbar) = options.group(SOCIALBAR) {
            for (name, value) in socialbar {
                query.append_pair(
                    &format!("plugin[socialbar-v1][{name}]"),
                    &value.to_query_string(),
                );
            }
        }
    }

    let query = url.query().unwrap_or_default().replace('+', "%20");
    url.set_query(Some(&query));
    Ok(url.into())
}

/// Iframe height: the video height plus room for the social bar.
pub fn iframe_height(options: &ResolvedOptions) -> u64 {
    let mut height = video_height(options);
    if options.has_group(SOCIALBAR) {
        height += SOCIALBAR_HEIGHT;
        let buttons = options.list(SOCIALBAR, "buttons").map_or(0, <[String]>::len);
        if buttons > SOCIALBAR_WRAP_AFTER {
            height += SOCIALBAR_WRAP_HEIGHT;
        }
    }
    height
}

/// Render the `<iframe>` element.
pub fn render(video: &VideoRecord, options: &ResolvedOptions) -> Result<String> {
    let src = iframe_url(&video.hashed_id, options)?;
    Ok(format!(
        r#"<iframe src="{src}"
    allowtransparency="true"
    frameborder="0"
    scrolling="no"
    class="wistia_embed"
    name="wistia_embed"
    width="{width}"
    height="{height}"></iframe>"#,
        src = escape_html(&src),
        width = video_width(options),
        height = iframe_height(options),
    ))
}
