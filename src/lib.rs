//! wistia-embed - Schema-driven embed options for hosted video
//!
//! This crate turns loosely-typed template parameters into a validated
//! embed configuration and renders iframe, JS-API or popover markup from
//! it. A declarative parameter schema drives type coercion, alias lookup,
//! conditional group inclusion and pruning; video metadata comes from a
//! [`VideoProvider`] such as the bundled [`WistiaClient`].
//!
//! # Resolving Options
//!
//! ```rust
//! use wistia_embed::{OptionsBuilder, RawOverrides, Schema, ServerContext};
//!
//! let overrides = RawOverrides::new()
//!     .with("width", "800")
//!     .with("playerColor", "#fff")
//!     .with("socialbar", "embed|twitter");
//!
//! let options = OptionsBuilder::new(Schema::embedded())
//!     .context(ServerContext::new("example.com").secure(true))
//!     .build(&overrides, None)
//!     .unwrap();
//!
//! assert_eq!(options.int("general", "videoWidth"), Some(800));
//! assert_eq!(options.str("general", "playerColor"), Some("ffffff"));
//! assert_eq!(options.bool("general", "ssl"), Some(true));
//! assert!(options.has_group("socialbar"));
//! ```
//!
//! # Rendering From The API
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wistia_embed::{RawOverrides, VideoField, WistiaClient};
//!
//! #[tokio::main]
//! async fn main() -> wistia_embed::Result<()> {
//!     let client = Arc::new(WistiaClient::new("0123456789abcdef")?);
//!     let field = VideoField::new(client);
//!
//!     let html = field
//!         .embed("1234567", &RawOverrides::new().with("type", "popover"))
//!         .await?;
//!     println!("{html}");
//!     Ok(())
//! }
//! ```

pub mod catalog;
#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod field;
pub mod options;
pub mod providers;
pub mod render;
pub mod schema;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export main types at crate root
pub use catalog::{VideoCatalog, normalize_selection};
pub use error::{EmbedError, Result};
pub use field::VideoField;
pub use options::{OptionsBuilder, ResolvedOptions, build_options};
pub use providers::{RetryConfig, RetryingVideoProvider, WistiaClient};
pub use schema::{ParameterGroup, ParameterKind, ParameterSpec, Schema};
pub use traits::VideoProvider;

// Re-export all types
pub use types::{
    Asset, EmbedType, OptionValue, Project, ProjectRef, RawOverrides, RawValue, ServerContext,
    Thumbnail, VideoRecord,
};

/// Crate version, as reported by the CLI.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
