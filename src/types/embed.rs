//! Embed type selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which renderer consumes the resolved options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedType {
    /// Plain iframe embed, configured through the iframe URL query.
    #[default]
    Iframe,
    /// JavaScript API embed; the only type that supports analytics.
    Api,
    /// Thumbnail that opens the player in a popover.
    Popover,
}

impl EmbedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iframe => "iframe",
            Self::Api => "api",
            Self::Popover => "popover",
        }
    }
}

impl fmt::Display for EmbedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbedType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "iframe" => Ok(Self::Iframe),
            "api" => Ok(Self::Api),
            "popover" => Ok(Self::Popover),
            _ => Err(()),
        }
    }
}
