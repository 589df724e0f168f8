//! Popover embed: a thumbnail link that opens the player over the page.

use super::{escape_html, iframe, scheme, video_height, video_width};
use crate::options::ResolvedOptions;
use crate::schema::GENERAL;
use crate::types::VideoRecord;
use crate::Result;

/// Popover behaviour script, loaded once per page.
const POPOVER_SCRIPT_PATH: &str = "fast.wistia.com/assets/external/popover-v1.js";

/// `wistia-popover[...]` class carrying the player size and colour.
pub fn popover_class(options: &ResolvedOptions) -> String {
    let mut params = vec![format!("height={}", video_height(options))];
    if let Some(color) = options.str(GENERAL, "playerColor") {
        params.push(format!("playerColor={color}"));
    }
    params.push(format!("width={}", video_width(options)));
    format!("wistia-popover[{}]", params.join(","))
}

/// Render the popover link. Falls back to a text link when the video has no thumbnail.
pub fn render(video: &VideoRecord, options: &ResolvedOptions) -> Result<String> {
    let href = format!("{}&popover=true", iframe::iframe_url(&video.hashed_id, options)?);
    let width = video_width(options);
    let height = video_height(options);
    let inner = match video.thumbnail_url() {
        Some(thumbnail) => {
            let base = thumbnail.split('?').next().unwrap_or(thumbnail);
            format!(
                r#"<img src="{src}" width="{width}" height="{height}" alt="{alt}" />"#,
                src = escape_html(&format!(
                    "{base}?image_play_button=true&image_crop_resized={width}x{height}"
                )),
                alt = escape_html(&video.name),
            )
        }
        None => escape_html(&video.name),
    };

    Ok(format!(
        r#"<a href="{href}" class="{class}">{inner}</a>
<script charset="ISO-8859-1" src="{scheme}://{POPOVER_SCRIPT_PATH}"></script>"#,
        href = escape_html(&href),
        class = popover_class(options),
        scheme = scheme(options),
    ))
}
