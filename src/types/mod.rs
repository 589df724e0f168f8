//! Public types for the wistia-embed API.

mod context;
mod embed;
mod overrides;
mod value;
mod video;

pub use context::ServerContext;
pub use embed::EmbedType;
pub use overrides::RawOverrides;
pub use value::{OptionValue, RawValue};
pub use video::{Asset, Project, ProjectRef, Thumbnail, VideoRecord};
