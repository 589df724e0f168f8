//! Compatibility adapter for older schema shapes.
//!
//! Earlier plugin releases shipped a flat schema (every option at the top
//! level, implicitly "general") and spelled a few options differently.
//! Both are normalized here into the grouped shape the options builder
//! expects, so renderers only ever see canonical option names.

use indexmap::IndexMap;

use super::{GENERAL, RawEntry, SOCIALBAR};

/// Option renames applied inside the general group.
///
/// Lookup is case-insensitive, so `autoplay` overrides still match after
/// the rename; only the resolved option name changes.
const GENERAL_RENAMES: &[(&str, &str)] = &[("autoplay", "autoPlay")];

/// Option renames applied inside the social bar group.
const SOCIALBAR_RENAMES: &[(&str, &str)] = &[("icons", "buttons")];

type RawGroups = IndexMap<String, IndexMap<String, RawEntry>>;

/// Wrap a flat document into a single `general` group.
pub(crate) fn adapt_flat(entries: IndexMap<String, RawEntry>) -> RawGroups {
    let mut groups = RawGroups::new();
    groups.insert(GENERAL.to_string(), entries);
    adapt_grouped(groups)
}

/// Apply per-group option renames to a grouped document.
pub(crate) fn adapt_grouped(groups: RawGroups) -> RawGroups {
    groups
        .into_iter()
        .map(|(name, entries)| {
            let renames: &[(&str, &str)] = match name.as_str() {
                GENERAL => GENERAL_RENAMES,
                SOCIALBAR => SOCIALBAR_RENAMES,
                _ => &[],
            };
            let entries = rename_options(entries, renames);
            (name, entries)
        })
        .collect()
}

/// Rename options in place, keeping declared order.
///
/// A legacy name is only renamed when the canonical name is not already present.
fn rename_options(
    entries: IndexMap<String, RawEntry>,
    renames: &[(&str, &str)],
) -> IndexMap<String, RawEntry> {
    let present: Vec<String> = entries.keys().cloned().collect();
    entries
        .into_iter()
        .map(|(name, entry)| {
            let renamed = renames
                .iter()
                .find(|(legacy, canonical)| {
                    name == *legacy && !present.iter().any(|p| p == canonical)
                })
                .map(|(_, canonical)| canonical.to_string());
            (renamed.unwrap_or(name), entry)
        })
        .collect()
}
