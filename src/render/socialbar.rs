//! Social sharing bar snippet for JS-API embeds.

use super::escape_js;
use crate::options::ResolvedOptions;
use crate::schema::SOCIALBAR;

/// Optional string options appended after `buttons`, in output order.
const STRING_OPTIONS: &[&str] = &["badgeImage", "pageUrl", "downloadType", "tweetText"];

/// Script attaching the social bar plugin to `wistiaEmbed_<hashedId>`.
///
/// Returns `None` when the social bar group was not resolved.
pub fn snippet(hashed_id: &str, options: &ResolvedOptions) -> Option<String> {
    let buttons = options.list(SOCIALBAR, "buttons")?;

    let mut extras = String::new();
    if let Some(badge_url) = options.str(SOCIALBAR, "badgeUrl") {
        extras.push_str(&format!(
            ",\n  logo: true,\n  badgeUrl: \"{}\"",
            escape_js(badge_url)
        ));
    }
    for name in STRING_OPTIONS {
        if let Some(value) = options.str(SOCIALBAR, name) {
            extras.push_str(&format!(",\n  {name}: \"{}\"", escape_js(value)));
        }
    }
    if let Some(show) = options.bool(SOCIALBAR, "showTweetCount") {
        extras.push_str(&format!(",\n  showTweetCount: {show}"));
    }

    Some(format!(
        "Wistia.plugin.socialbar(wistiaEmbed_{hashed_id}, {{\n  version: \"v1\",\n  buttons: \"{buttons}\"{extras}\n}});",
        buttons = escape_js(&buttons.join("-")),
    ))
}
