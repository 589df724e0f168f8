//! Caller-supplied option overrides.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use super::value::RawValue;
use crate::{EmbedError, Result};

/// Case-insensitive mapping of override key → raw value.
///
/// Keys are lowercased on insert, so `videoWidth`, `VIDEOWIDTH` and
/// `videowidth` all address the same option. Non-general groups are
/// namespaced `group:option` (e.g. `ga:label`); the social bar's button
/// list is the bare key `socialbar`.
///
/// ```rust
/// # use wistia_embed::{RawOverrides, RawValue};
/// let overrides = RawOverrides::new()
///     .with("videoWidth", "800")
///     .with("autoPlay", true);
/// assert_eq!(overrides.get("VIDEOWIDTH"), Some(&RawValue::from("800")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOverrides {
    entries: IndexMap<String, RawValue>,
}

impl RawOverrides {
    /// Create an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert (or replace) an override. Later inserts win.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<RawValue>) {
        self.entries
            .insert(key.as_ref().to_lowercase(), value.into());
    }

    /// Look up an override, ignoring key case.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(&key.to_lowercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether any key is `prefix` itself or lives under `prefix:`.
    pub fn has_namespace(&self, prefix: &str) -> bool {
        let prefix = prefix.to_lowercase();
        self.entries.keys().any(|key| {
            key == &prefix
                || key
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with(':'))
        })
    }

    /// Iterate over `(lowercased key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a template parameter of the form `key=value`.
    ///
    /// The value is kept as a raw string; sanitizers decide what it means.
    pub fn parse_pair(pair: &str) -> Result<(String, RawValue)> {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            EmbedError::InvalidInput(format!("expected key=value, got '{pair}'"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(EmbedError::InvalidInput(format!(
                "empty parameter name in '{pair}'"
            )));
        }
        Ok((key.to_lowercase(), RawValue::Str(value.to_string())))
    }

    /// Build overrides from a list of `key=value` parameters.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = Self::new();
        for pair in pairs {
            let (key, value) = Self::parse_pair(pair.as_ref())?;
            overrides.insert(key, value);
        }
        Ok(overrides)
    }
}

impl<K: AsRef<str>, V: Into<RawValue>> FromIterator<(K, V)> for RawOverrides {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut overrides = Self::new();
        for (key, value) in iter {
            overrides.insert(key, value);
        }
        overrides
    }
}

impl<'de> Deserialize<'de> for RawOverrides {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = IndexMap::<String, RawValue>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
