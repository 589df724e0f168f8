//! JavaScript API embed.
//!
//! Emits a sized container, loads the player library once per page, polls
//! until `Wistia` is defined, then constructs the embed with every general
//! option and attaches the social bar and analytics snippets when present.

use super::{
    analytics, check_hashed_id, escape_js, scheme, socialbar, video_height, video_width,
};
use crate::options::ResolvedOptions;
use crate::schema::GENERAL;
use crate::types::{OptionValue, VideoRecord};
use crate::Result;

/// General options that drive rendering rather than the player.
const RENDER_ONLY: &[&str] = &["type", "ssl"];

/// Player library bundle, loaded relative to the embed's scheme.
const LOADER_PATH: &str =
    "fast.wistia.com/static/concat/E-v1%2Csocialbar-v1%2CpostRoll-v1%2CrequireEmail-v1.js";

/// URL of the player library.
pub fn loader_url(options: &ResolvedOptions) -> String {
    format!("{}://{LOADER_PATH}", scheme(options))
}

/// `Wistia.embed` option object entries, one `name: literal` per line.
pub fn embed_options(options: &ResolvedOptions) -> String {
    let mut lines = vec!["version: \"v1\"".to_string()];
    if let Some(general) = options.group(GENERAL) {
        for (name, value) in general {
            if RENDER_ONLY.contains(&name.as_str()) {
                continue;
            }
            lines.push(format!("{name}: {}", js_literal(value)));
        }
    }
    lines.join(",\n      ")
}

fn js_literal(value: &OptionValue) -> String {
    match value {
        OptionValue::Bool(_) | OptionValue::Int(_) => value.to_query_string(),
        OptionValue::Str(_) | OptionValue::List(_) => {
            format!("'{}'", escape_js(&value.to_query_string()))
        }
    }
}

/// Render the container and initialization script.
pub fn render(video: &VideoRecord, options: &ResolvedOptions) -> Result<String> {
    let id = &video.hashed_id;
    check_hashed_id(id)?;
    let width = video_width(options);
    let height = video_height(options);
    let plugins: String = [
        socialbar::snippet(id, options),
        analytics::snippet(id, options),
    ]
    .into_iter()
    .flatten()
    .map(|snippet| format!("\n    {}", snippet.replace('\n', "\n    ")))
    .collect();

    Ok(format!(
        r#"<div id="wistia_{id}"
    class="wistia_embed"
    style="width:{width}px;height:{height}px;"
    data-video-width="{width}"
    data-video-height="{height}">&nbsp;
</div>
<script>
  if (typeof wistiaScript === 'undefined') {{
    var wistiaScript = document.createElement('script');
    wistiaScript.src = '{loader}';
    document.getElementsByTagName('head')[0].appendChild(wistiaScript);
  }}

  function wistiaInit_{id}() {{
    if (typeof Wistia === 'undefined') {{
      setTimeout(wistiaInit_{id}, 100);
      return;
    }}

    wistiaEmbed_{id} = Wistia.embed("{id}", {{
      {embed_options}
    }});{plugins}
  }}

  wistiaInit_{id}();
</script>"#,
        loader = loader_url(options),
        embed_options = embed_options(options),
    ))
}
