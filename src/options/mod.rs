//! Embed option resolution.
//!
//! Raw template overrides go in, a validated [`ResolvedOptions`] comes out:
//!
//! - [`sanitize`]: per-type value sanitizers
//! - [`resolve`]: single-option lookup (primary key, then aliases)
//! - [`builder`]: walks the schema, gates groups, prunes empties

pub mod builder;
pub mod resolve;
pub mod sanitize;

pub use builder::{OptionsBuilder, build_options};

use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::GENERAL;
use crate::types::{EmbedType, OptionValue};

/// Resolved values of one group, keyed by option name.
pub type OptionGroup = IndexMap<String, OptionValue>;

/// Validated embed configuration: group name → option name → value.
///
/// Built fresh per render by [`OptionsBuilder`] and never mutated afterwards.
/// The `general` group is always present; any other group is present only if
/// it was triggered and kept at least one non-empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedOptions {
    groups: IndexMap<String, OptionGroup>,
}

impl ResolvedOptions {
    pub(crate) fn from_groups(groups: IndexMap<String, OptionGroup>) -> Self {
        Self { groups }
    }

    pub fn group(&self, name: &str) -> Option<&OptionGroup> {
        self.groups.get(name)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Groups in schema order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &OptionGroup)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, group: &str, option: &str) -> Option<&OptionValue> {
        self.groups.get(group).and_then(|g| g.get(option))
    }

    pub fn bool(&self, group: &str, option: &str) -> Option<bool> {
        self.get(group, option).and_then(OptionValue::as_bool)
    }

    pub fn int(&self, group: &str, option: &str) -> Option<u64> {
        self.get(group, option).and_then(OptionValue::as_int)
    }

    pub fn str(&self, group: &str, option: &str) -> Option<&str> {
        self.get(group, option).and_then(OptionValue::as_str)
    }

    pub fn list(&self, group: &str, option: &str) -> Option<&[String]> {
        self.get(group, option).and_then(OptionValue::as_list)
    }

    /// The resolved embed type, defaulting to iframe.
    pub fn embed_type(&self) -> EmbedType {
        self.str(GENERAL, "type")
            .and_then(|t| t.parse().ok())
            .unwrap_or_default()
    }
}
