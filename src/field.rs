//! Template tag surface for a stored video selection.
//!
//! [`VideoField`] is what a template engine calls: the main tag renders the
//! embed, and the modifiers (`:name`, `:thumbnail`, `:asset_url`, ...) read
//! single fields of the video record.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::options::OptionsBuilder;
use crate::options::sanitize::{sanitize_bool, sanitize_int};
use crate::render::{self, escape_html};
use crate::schema::Schema;
use crate::telemetry;
use crate::traits::VideoProvider;
use crate::types::{RawOverrides, ServerContext, VideoRecord};
use crate::{EmbedError, Result};

/// Modifiers that read a field straight off the video record.
pub const CATCHALL_MODIFIERS: &[&str] = &[
    "created",
    "description",
    "duration",
    "hashed_id",
    "id",
    "name",
    "progress",
    "section",
    "type",
    "updated",
];

/// Asset format used when the `format` parameter is absent or invalid.
pub const DEFAULT_ASSET_FORMAT: &str = "mp4";

/// A video field bound to a provider, a schema and the current request.
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use wistia_embed::{RawOverrides, ServerContext, VideoField, WistiaClient};
/// # async fn example() -> wistia_embed::Result<()> {
/// let client = Arc::new(WistiaClient::new("0123abcd")?);
/// let field = VideoField::new(client).context(ServerContext::new("example.com"));
///
/// let overrides = RawOverrides::new().with("type", "api");
/// let html = field.embed("1234567", &overrides).await?;
/// # Ok(())
/// # }
/// ```
pub struct VideoField<P: VideoProvider + ?Sized> {
    provider: Arc<P>,
    schema: Arc<Schema>,
    context: ServerContext,
}

impl<P: VideoProvider + ?Sized> VideoField<P> {
    /// Bind a provider with the embedded schema and a default context.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            schema: Arc::clone(Schema::embedded_shared()),
            context: ServerContext::default(),
        }
    }

    /// Use a custom schema instead of the embedded one.
    pub fn schema(mut self, schema: impl Into<Arc<Schema>>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn context(mut self, context: ServerContext) -> Self {
        self.context = context;
        self
    }

    /// Render the embed markup for a video.
    pub async fn embed(&self, video_id: &str, overrides: &RawOverrides) -> Result<String> {
        let result = async {
            let video = self.provider.fetch_video(video_id).await?;
            let options = OptionsBuilder::new(&self.schema)
                .context(self.context.clone())
                .build(overrides, Some(&video))?;
            let embed_type = options.embed_type();
            let html = render::render(&video, &options)?;

            metrics::counter!(telemetry::RENDERS_TOTAL, "type" => embed_type.as_str())
                .increment(1);
            debug!(video_id, embed_type = %embed_type, "rendered embed");
            Ok::<_, EmbedError>(html)
        }
        .await;
        result.inspect_err(|e| warn!(video_id, error = %e, "failed to render embed"))
    }

    /// Read one field of the video record by modifier name.
    ///
    /// With `striptags=yes` the value has markup removed, is HTML-escaped and
    /// trimmed. Fields the host left empty render as the empty string.
    pub async fn modifier(
        &self,
        video_id: &str,
        name: &str,
        overrides: &RawOverrides,
    ) -> Result<String> {
        let name = name.to_lowercase();
        if !CATCHALL_MODIFIERS.contains(&name.as_str()) {
            return Err(EmbedError::UnknownModifier(name));
        }

        let video = self.fetch(video_id).await?;
        let value = video.field(&name).unwrap_or_default();

        let strip = overrides
            .get("striptags")
            .is_some_and(|v| sanitize_bool(v, false));
        if strip {
            Ok(escape_html(&strip_tags(&value)).trim().to_string())
        } else {
            Ok(value)
        }
    }

    /// Thumbnail URL, cropped when both `videoWidth` and `videoHeight` are given.
    pub async fn thumbnail(&self, video_id: &str, overrides: &RawOverrides) -> Result<String> {
        let video = self.fetch(video_id).await?;
        thumbnail_url(&video, overrides)
            .inspect_err(|e| warn!(video_id, error = %e, "no thumbnail"))
    }

    /// URL of the first asset, in the requested `format`.
    pub async fn asset_url(&self, video_id: &str, overrides: &RawOverrides) -> Result<String> {
        let video = self.fetch(video_id).await?;
        asset_url(&video, overrides).inspect_err(|e| warn!(video_id, error = %e, "no asset"))
    }

    async fn fetch(&self, video_id: &str) -> Result<VideoRecord> {
        self.provider
            .fetch_video(video_id)
            .await
            .inspect_err(|e| warn!(video_id, error = %e, "failed to fetch video"))
    }
}

/// Thumbnail URL of a record, resized via `image_crop_resized` when the
/// overrides carry both dimensions as non-negative integers.
pub fn thumbnail_url(video: &VideoRecord, overrides: &RawOverrides) -> Result<String> {
    let url = video
        .thumbnail_url()
        .ok_or(EmbedError::MissingVideoField("thumbnail"))?;

    let dimension = |key: &str| {
        overrides
            .get(key)
            .and_then(|v| sanitize_int(v, None))
            .filter(|n| *n > 0)
    };
    match (dimension("videowidth"), dimension("videoheight")) {
        (Some(width), Some(height)) => {
            let base = url.split('?').next().unwrap_or(url);
            Ok(format!("{base}?image_crop_resized={width}x{height}"))
        }
        _ => Ok(url.to_string()),
    }
}

/// First asset URL with the `.bin` suffix swapped for `/file.<format>`.
pub fn asset_url(video: &VideoRecord, overrides: &RawOverrides) -> Result<String> {
    let asset = video
        .assets
        .first()
        .ok_or(EmbedError::MissingVideoField("assets"))?;

    let format = overrides
        .get("format")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or(DEFAULT_ASSET_FORMAT);

    Ok(asset.url.replace(".bin", &format!("/file.{format}")))
}

/// Remove anything that looks like a markup tag.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoVideos;

    #[async_trait::async_trait]
    impl VideoProvider for NoVideos {
        fn name(&self) -> &str {
            "none"
        }

        async fn fetch_video(&self, video_id: &str) -> Result<VideoRecord> {
            Err(EmbedError::VideoNotFound(video_id.to_string()))
        }
    }

    #[test]
    fn fields_share_the_embedded_schema() {
        let first = VideoField::new(Arc::new(NoVideos));
        let second = VideoField::new(Arc::new(NoVideos));
        assert!(Arc::ptr_eq(&first.schema, &second.schema));
        assert!(Arc::ptr_eq(&first.schema, Schema::embedded_shared()));
    }

    #[test]
    fn strip_tags_removes_markup() {
        assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_tags("a > b"), "a > b");
    }

    #[test]
    fn unterminated_tag_is_dropped() {
        assert_eq!(strip_tags("text <broken"), "text ");
    }
}
