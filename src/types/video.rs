//! Video host API records.
//!
//! Deserialized from the `/v1/medias/<id>.json`, `/v1/medias.json` and
//! `/v1/projects.json` responses. Only `id`, `hashed_id` and `name` are
//! required; everything else defaults when absent.

use serde::{Deserialize, Serialize};

/// A single hosted video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: u64,
    /// Opaque public identifier used in embed URLs.
    pub hashed_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Processing progress, 0.0 to 1.0.
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
}

impl VideoRecord {
    /// Minimal record, mostly useful for offline resolution and tests.
    pub fn new(id: u64, hashed_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            hashed_id: hashed_id.into(),
            name: name.into(),
            description: None,
            created: None,
            updated: None,
            duration: None,
            progress: None,
            section: None,
            media_type: None,
            thumbnail: None,
            assets: Vec::new(),
            project: None,
        }
    }

    /// Thumbnail URL, if the host reported one.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail.as_ref().map(|t| t.url.as_str())
    }

    /// Look up a field by its template modifier name.
    ///
    /// Returns `None` for unknown names and for known fields the host left empty.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "hashed_id" => Some(self.hashed_id.clone()),
            "name" => Some(self.name.clone()),
            "description" => self.description.clone(),
            "created" => self.created.clone(),
            "updated" => self.updated.clone(),
            "duration" => self.duration.map(|d| d.to_string()),
            "progress" => self.progress.map(|p| p.to_string()),
            "section" => self.section.clone(),
            "type" => self.media_type.clone(),
            _ => None,
        }
    }
}

/// Thumbnail reference on a video record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// One encoded rendition of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub url: String,
    #[serde(rename = "type", default)]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Project a video belongs to, as embedded in a media record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub hashed_id: Option<String>,
}

/// A project as listed by `/v1/projects.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default, alias = "hashed_id")]
    pub hashed_id: Option<String>,
    #[serde(default)]
    pub media_count: Option<u64>,
}
