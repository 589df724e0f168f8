//! Single-option resolution: lookup key, aliases, sanitizer.

use tracing::debug;

use super::sanitize;
use crate::schema::ParameterSpec;
use crate::telemetry;
use crate::types::{OptionValue, RawOverrides, RawValue, ServerContext};

/// Find the first override present among `key` and then each alias, in order.
pub fn lookup<'a>(
    key: &str,
    overrides: &'a RawOverrides,
    aliases: &[String],
) -> Option<(&'a RawValue, String)> {
    std::iter::once(key.to_lowercase())
        .chain(aliases.iter().map(|a| a.to_lowercase()))
        .find_map(|candidate| overrides.get(&candidate).map(|value| (value, candidate)))
}

/// Resolve one option's effective value.
///
/// The primary key is tried first, then each alias; the first present wins.
/// The candidate goes through the sanitizer for `spec`'s type. A missing or
/// rejected candidate resolves to the schema default. Returns `None` only
/// when the default itself is "no value" (an empty integer default).
pub fn resolve(
    key: &str,
    overrides: &RawOverrides,
    spec: &ParameterSpec,
    context: &ServerContext,
) -> Option<OptionValue> {
    let Some((candidate, matched_key)) = lookup(key, overrides, &spec.aliases) else {
        return spec.default_value();
    };

    match sanitize::accept(&spec.kind, candidate, context) {
        Some(value) => Some(value),
        None => {
            debug!(
                option = key,
                matched = %matched_key,
                value = ?candidate,
                "override rejected, using default"
            );
            metrics::counter!(telemetry::OPTION_FALLBACKS_TOTAL, "option" => key.to_owned())
                .increment(1);
            spec.default_value()
        }
    }
}
