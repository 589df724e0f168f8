//! Request context of the page the embed is rendered into.

use serde::{Deserialize, Serialize};

/// The incoming request the embed is being rendered for.
///
/// Passed explicitly into every resolution call; relative URLs are
/// absolutized against it and a secure request forces SSL embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerContext {
    /// Whether the page is served over HTTPS.
    #[serde(default)]
    pub is_secure: bool,
    /// Host header of the request (may include a port).
    pub host: String,
    /// Request path of the page, used to resolve page-relative URLs.
    #[serde(default = "default_request_uri")]
    pub request_uri: String,
}

fn default_request_uri() -> String {
    "/".to_string()
}

impl Default for ServerContext {
    fn default() -> Self {
        Self {
            is_secure: false,
            host: "localhost".to_string(),
            request_uri: default_request_uri(),
        }
    }
}

impl ServerContext {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn secure(mut self, is_secure: bool) -> Self {
        self.is_secure = is_secure;
        self
    }

    pub fn request_uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uri = uri.into();
        self
    }

    pub fn scheme(&self) -> &'static str {
        if self.is_secure { "https" } else { "http" }
    }

    /// `scheme://host` with no trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme(), self.host)
    }
}
