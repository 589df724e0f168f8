//! Raw and resolved option values.

use serde::{Deserialize, Serialize};

/// A value exactly as a template author supplied it.
///
/// Template parameters arrive as strings, but callers embedding the crate
/// may pass booleans, integers, or pre-split lists directly. Deserializes
/// untagged so a JSON override document maps onto it naturally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl RawValue {
    /// The string form, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// A sanitized, strictly-typed option value.
///
/// Booleans stay booleans until the render boundary, where
/// [`to_query_string()`](Self::to_query_string) turns them into the
/// literal `"true"`/`"false"` the player expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(u64),
    Str(String),
    List(Vec<String>),
}

impl OptionValue {
    /// Whether this value is dropped by the pruning rule.
    ///
    /// Empty strings and empty lists are empty; booleans and integers never are.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Str(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Bool(_) | Self::Int(_) => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Serialize for a URL query or script literal.
    ///
    /// Lists are joined with `-`, the social bar's button separator.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Bool(true) => "true".to_string(),
            Self::Bool(false) => "false".to_string(),
            Self::Int(i) => i.to_string(),
            Self::Str(s) => s.clone(),
            Self::List(items) => items.join("-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_deserializes_untagged() {
        let values: Vec<RawValue> =
            serde_json::from_str(r#"[true, 42, "yes", ["embed", "email"]]"#).unwrap();
        assert_eq!(values[0], RawValue::Bool(true));
        assert_eq!(values[1], RawValue::Int(42));
        assert_eq!(values[2], RawValue::Str("yes".into()));
        assert_eq!(
            values[3],
            RawValue::List(vec!["embed".into(), "email".into()])
        );
    }

    #[test]
    fn pruning_rule() {
        assert!(OptionValue::Str(String::new()).is_empty());
        assert!(OptionValue::List(vec![]).is_empty());
        assert!(!OptionValue::Bool(false).is_empty());
        assert!(!OptionValue::Int(0).is_empty());
    }

    #[test]
    fn query_string_forms() {
        assert_eq!(OptionValue::Bool(true).to_query_string(), "true");
        assert_eq!(OptionValue::Bool(false).to_query_string(), "false");
        assert_eq!(OptionValue::Int(640).to_query_string(), "640");
        assert_eq!(
            OptionValue::List(vec!["embed".into(), "twitter".into()]).to_query_string(),
            "embed-twitter"
        );
    }
}
