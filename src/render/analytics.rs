//! Google Analytics play/end event tracking for JS-API embeds.

use super::escape_js;
use crate::options::ResolvedOptions;
use crate::schema::ANALYTICS;

/// Arguments of one `_trackEvent` push, minus the leading command name.
///
/// `value` is only sent with a `label`, and `nonInteraction` only with a
/// `value`, matching the positional event signature.
pub fn event_args(options: &ResolvedOptions, action: &str) -> Vec<String> {
    let mut args = vec![
        format!("'{}'", escape_js(options.str(ANALYTICS, "category").unwrap_or("Video"))),
        format!("'{}'", escape_js(action)),
    ];
    let Some(label) = options.str(ANALYTICS, "label") else {
        return args;
    };
    args.push(format!("'{}'", escape_js(label)));
    let Some(value) = options.int(ANALYTICS, "value") else {
        return args;
    };
    args.push(value.to_string());
    if let Some(non_interaction) = options.bool(ANALYTICS, "nonInteraction") {
        args.push(non_interaction.to_string());
    }
    args
}

/// Tracking script bound to `wistiaEmbed_<hashedId>`.
///
/// The play event fires once; the end event fires every time playback ends.
/// Returns `None` when analytics was not enabled for this embed.
pub fn snippet(hashed_id: &str, options: &ResolvedOptions) -> Option<String> {
    if !options.has_group(ANALYTICS) {
        return None;
    }
    let play_action = options.str(ANALYTICS, "playAction").unwrap_or("Play");
    let end_action = options.str(ANALYTICS, "endAction").unwrap_or("Complete");
    let play = event_args(options, play_action).join(", ");
    let end = event_args(options, end_action).join(", ");

    Some(format!(
        r#"function ga_{hashed_id}() {{
  _gaq.push(['_trackEvent', {play}]);
  wistiaEmbed_{hashed_id}.unbind('play', ga_{hashed_id});
}}
wistiaEmbed_{hashed_id}.bind('play', ga_{hashed_id});
wistiaEmbed_{hashed_id}.bind('end', function () {{
  _gaq.push(['_trackEvent', {end}]);
}});"#
    ))
}
