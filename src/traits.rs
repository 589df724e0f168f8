//! Core VideoProvider trait

use async_trait::async_trait;

use crate::types::{Project, VideoRecord};
use crate::{EmbedError, Result};

/// Source of video metadata for embeds.
///
/// The options builder and renderers only ever read a [`VideoRecord`];
/// where it comes from (the hosted API, a cache, a fixture) is up to the
/// implementation. Implementations own retry and timeout policy.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Provider name for logging and metrics.
    fn name(&self) -> &str;

    /// Fetch a single video by its numeric or hashed id.
    async fn fetch_video(&self, video_id: &str) -> Result<VideoRecord>;

    /// List the projects visible to this account, sorted by name.
    async fn list_projects(&self) -> Result<Vec<Project>> {
        Err(EmbedError::NotImplemented("list_projects"))
    }

    /// List the videos of one project, sorted by name.
    async fn list_project_videos(&self, _project_id: &str) -> Result<Vec<VideoRecord>> {
        Err(EmbedError::NotImplemented("list_project_videos"))
    }
}
