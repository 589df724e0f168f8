//! Parameter schema: the declarative description of every embed option.
//!
//! A schema is a JSON document of groups, each an object of option name →
//! `{ "type", "default", "values"?, "aliases"? }`:
//!
//! ```json
//! {
//!   "general": {
//!     "videoWidth": { "type": "int", "default": 640, "aliases": ["width"] }
//!   }
//! }
//! ```
//!
//! Group and option order are preserved; the options builder walks groups
//! in declared order. Every entry is validated when the schema is loaded,
//! so a malformed schema fails once, up front, and never per request.
//!
//! The canonical schema is compiled in and available via [`Schema::embedded()`].
//! Older flat (ungrouped) documents are accepted through the [`legacy`] adapter.

pub mod legacy;

use std::path::Path;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::options::sanitize;
use crate::types::OptionValue;
use crate::{EmbedError, Result};

/// Group that is always resolved; its keys are not namespaced.
pub const GENERAL: &str = "general";
/// Social sharing bar group, included only when requested.
pub const SOCIALBAR: &str = "socialbar";
/// Analytics group, included only for enabled API embeds.
pub const ANALYTICS: &str = "ga";

/// Option names that carry the social bar's chosen buttons.
///
/// `icons` is the name used by older schemas.
pub const SOCIALBAR_TRIGGERS: &[&str] = &["buttons", "icons"];

/// Raw JSON source of the compiled-in schema.
const EMBEDDED_SCHEMA: &str = include_str!("parameters.json");

/// The type of a parameter together with its typed default.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    Bool { default: bool },
    /// Six-digit hex colour without the leading `#`.
    Hex { default: String },
    /// Non-negative integer; `None` means "no value" and is pruned.
    Int { default: Option<u64> },
    /// One of a fixed set of literals.
    List { default: String, values: Vec<String> },
    /// Any subset of a fixed set of literals.
    MultiSelect {
        default: Vec<String>,
        values: Vec<String>,
    },
    /// URL, absolutized against the request context.
    Url { default: String },
    /// Free text, passed through.
    String { default: String },
}

/// One schema entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub kind: ParameterKind,
    /// Alternate lookup keys, tried in order after the primary key.
    pub aliases: Vec<String>,
}

impl ParameterSpec {
    pub fn new(kind: ParameterKind) -> Self {
        Self {
            kind,
            aliases: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Schema type tag (`bool`, `hex`, ...).
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ParameterKind::Bool { .. } => "bool",
            ParameterKind::Hex { .. } => "hex",
            ParameterKind::Int { .. } => "int",
            ParameterKind::List { .. } => "list",
            ParameterKind::MultiSelect { .. } => "multiselect",
            ParameterKind::Url { .. } => "url",
            ParameterKind::String { .. } => "string",
        }
    }

    /// The default as a resolved value, or `None` for an empty integer default.
    pub fn default_value(&self) -> Option<OptionValue> {
        match &self.kind {
            ParameterKind::Bool { default } => Some(OptionValue::Bool(*default)),
            ParameterKind::Int { default } => default.map(OptionValue::Int),
            ParameterKind::MultiSelect { default, .. } => Some(OptionValue::List(default.clone())),
            ParameterKind::Hex { default }
            | ParameterKind::List { default, .. }
            | ParameterKind::Url { default }
            | ParameterKind::String { default } => Some(OptionValue::Str(default.clone())),
        }
    }

    /// Allowed literals for `list` and `multiselect`; empty otherwise.
    pub fn allowed_values(&self) -> &[String] {
        match &self.kind {
            ParameterKind::List { values, .. } | ParameterKind::MultiSelect { values, .. } => {
                values
            }
            _ => &[],
        }
    }
}

/// Named, ordered set of options.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGroup {
    name: String,
    options: IndexMap<String, ParameterSpec>,
}

impl ParameterGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: IndexMap::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.options.insert(name.into(), spec);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, option: &str) -> Option<&ParameterSpec> {
        self.options.get(option)
    }

    /// Options in declared order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &ParameterSpec)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Name of this group's social bar trigger option, if it has one.
    pub fn trigger_option(&self) -> Option<&str> {
        SOCIALBAR_TRIGGERS
            .iter()
            .copied()
            .find(|name| self.options.contains_key(*name))
    }
}

/// The full, immutable parameter schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    groups: IndexMap<String, ParameterGroup>,
}

impl Schema {
    /// The compiled-in canonical schema, parsed once per process.
    pub fn embedded() -> &'static Schema {
        Self::embedded_shared()
    }

    /// The compiled-in schema as a shared handle; every call returns the same allocation.
    pub fn embedded_shared() -> &'static Arc<Schema> {
        static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            // The embedded document is covered by tests; failing here is a build defect.
            Arc::new(Schema::from_json(EMBEDDED_SCHEMA).expect("embedded parameter schema is valid"))
        })
    }

    /// Parse and validate a schema document.
    ///
    /// Accepts both the grouped format and the legacy flat format.
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: RawPayload = serde_json::from_str(json)
            .map_err(|e| EmbedError::Schema(format!("failed to parse schema JSON: {e}")))?;
        let raw_groups = match payload {
            RawPayload::Grouped(groups) => legacy::adapt_grouped(groups),
            RawPayload::Flat(entries) => legacy::adapt_flat(entries),
        };

        let mut schema = Schema::default();
        for (group_name, entries) in raw_groups {
            let mut group = ParameterGroup::new(&group_name);
            for (option_name, entry) in entries {
                let spec = entry.into_spec(&group_name, &option_name)?;
                group.options.insert(option_name, spec);
            }
            schema.groups.insert(group_name, group);
        }

        if !schema.groups.contains_key(GENERAL) {
            return Err(EmbedError::Schema(format!(
                "schema has no '{GENERAL}' group"
            )));
        }
        Ok(schema)
    }

    /// Load and validate a schema file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EmbedError::Schema(format!("failed to read schema file {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Build a schema from groups constructed in code.
    pub fn from_groups(groups: impl IntoIterator<Item = ParameterGroup>) -> Result<Self> {
        let groups: IndexMap<String, ParameterGroup> = groups
            .into_iter()
            .map(|g| (g.name.clone(), g))
            .collect();
        if !groups.contains_key(GENERAL) {
            return Err(EmbedError::Schema(format!(
                "schema has no '{GENERAL}' group"
            )));
        }
        Ok(Self { groups })
    }

    pub fn group(&self, name: &str) -> Option<&ParameterGroup> {
        self.groups.get(name)
    }

    /// Groups in declared order.
    pub fn groups(&self) -> impl Iterator<Item = &ParameterGroup> {
        self.groups.values()
    }

    /// Look up a single option by group and name.
    pub fn spec(&self, group: &str, option: &str) -> Option<&ParameterSpec> {
        self.groups.get(group).and_then(|g| g.get(option))
    }
}

/// Accept both grouped and flat schema documents.
///
/// A flat document's values are entries (with a string `type`), which fail
/// to deserialize as groups, so the grouped form is tried first.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPayload {
    Grouped(IndexMap<String, IndexMap<String, RawEntry>>),
    Flat(IndexMap<String, RawEntry>),
}

/// A schema entry as written, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawEntry {
    #[serde(rename = "type")]
    kind: Option<String>,
    default: Option<Value>,
    #[serde(default)]
    values: Option<Vec<String>>,
    #[serde(default)]
    aliases: Vec<String>,
}

impl RawEntry {
    fn into_spec(self, group: &str, option: &str) -> Result<ParameterSpec> {
        let err = |msg: String| EmbedError::Schema(format!("{group}.{option}: {msg}"));

        let kind_name = self.kind.ok_or_else(|| err("missing 'type'".into()))?;
        let default = self.default.ok_or_else(|| err("missing 'default'".into()))?;

        let kind = match kind_name.as_str() {
            "bool" => {
                let parsed = match &default {
                    Value::Bool(b) => Some(*b),
                    Value::String(s) => sanitize::parse_bool(s),
                    _ => None,
                };
                ParameterKind::Bool {
                    default: parsed.ok_or_else(|| err(format!("invalid bool default {default}")))?,
                }
            }
            "hex" => {
                let raw = expect_string(&default).ok_or_else(|| err("hex default must be a string".into()))?;
                let normalized = if raw.is_empty() {
                    String::new()
                } else {
                    sanitize::parse_hex(raw)
                        .ok_or_else(|| err(format!("invalid hex default '{raw}'")))?
                };
                ParameterKind::Hex { default: normalized }
            }
            "int" => {
                let parsed = match &default {
                    Value::Number(n) => Some(
                        n.as_u64()
                            .ok_or_else(|| err(format!("int default must be non-negative, got {n}")))?,
                    ),
                    Value::String(s) if s.is_empty() => None,
                    Value::String(s) => Some(
                        sanitize::parse_int(s)
                            .ok_or_else(|| err(format!("invalid int default '{s}'")))?,
                    ),
                    other => return Err(err(format!("invalid int default {other}"))),
                };
                ParameterKind::Int { default: parsed }
            }
            "list" => {
                let values = self
                    .values
                    .ok_or_else(|| err("'list' requires 'values'".into()))?;
                let raw = expect_string(&default).ok_or_else(|| err("list default must be a string".into()))?;
                if !raw.is_empty() && !values.iter().any(|v| v == raw) {
                    return Err(err(format!("default '{raw}' is not one of {values:?}")));
                }
                ParameterKind::List {
                    default: raw.to_string(),
                    values,
                }
            }
            "multiselect" => {
                let values = self
                    .values
                    .ok_or_else(|| err("'multiselect' requires 'values'".into()))?;
                let items: Vec<String> = match &default {
                    Value::String(s) if s.is_empty() => Vec::new(),
                    Value::String(s) => s.split('|').map(str::to_string).collect(),
                    Value::Array(items) => items
                        .iter()
                        .map(|v| {
                            expect_string(v)
                                .map(str::to_string)
                                .ok_or_else(|| err("multiselect default items must be strings".into()))
                        })
                        .collect::<Result<_>>()?,
                    other => return Err(err(format!("invalid multiselect default {other}"))),
                };
                if let Some(bad) = items.iter().find(|item| !values.contains(item)) {
                    return Err(err(format!("default item '{bad}' is not one of {values:?}")));
                }
                ParameterKind::MultiSelect {
                    default: items,
                    values,
                }
            }
            "url" => ParameterKind::Url {
                default: expect_string(&default)
                    .ok_or_else(|| err("url default must be a string".into()))?
                    .to_string(),
            },
            "string" => ParameterKind::String {
                default: expect_string(&default)
                    .ok_or_else(|| err("string default must be a string".into()))?
                    .to_string(),
            },
            other => return Err(err(format!("unknown type '{other}'"))),
        };

        Ok(ParameterSpec {
            kind,
            aliases: self.aliases.into_iter().map(|a| a.to_lowercase()).collect(),
        })
    }
}

fn expect_string(value: &Value) -> Option<&str> {
    value.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_schema_parses() {
        let schema = Schema::embedded();
        let names: Vec<&str> = schema.groups().map(|g| g.name()).collect();
        assert_eq!(names, vec![GENERAL, SOCIALBAR, ANALYTICS]);
    }

    #[test]
    fn embedded_schema_keeps_declared_order() {
        let general = Schema::embedded().group(GENERAL).unwrap();
        let first: Vec<&str> = general.options().map(|(name, _)| name).take(3).collect();
        assert_eq!(first, vec!["autoPlay", "controlsVisibleOnLoad", "endVideoBehavior"]);
    }

    #[test]
    fn string_bool_default_is_coerced() {
        let spec = Schema::embedded().spec(ANALYTICS, "nonInteraction").unwrap();
        assert_eq!(spec.kind, ParameterKind::Bool { default: false });
    }

    #[test]
    fn empty_int_default_means_no_value() {
        let spec = Schema::embedded().spec(ANALYTICS, "value").unwrap();
        assert_eq!(spec.kind, ParameterKind::Int { default: None });
        assert_eq!(spec.default_value(), None);
    }

    #[test]
    fn aliases_are_lowercased() {
        let json = r#"{"general": {"videoWidth": {"type": "int", "default": 1, "aliases": ["Width"]}}}"#;
        let schema = Schema::from_json(json).unwrap();
        assert_eq!(schema.spec(GENERAL, "videoWidth").unwrap().aliases, vec!["width"]);
    }
}
