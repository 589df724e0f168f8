//! Video picker data.
//!
//! Groups the videos of the configured projects by project name, then by
//! optional section, in the shape an editor's drop-down needs.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::traits::VideoProvider;
use crate::types::VideoRecord;
use crate::Result;

/// Prefix marking a section header value in the picker.
pub const SECTION_PREFIX: &str = "section-";

/// Label of the leading empty choice.
pub const EMPTY_CHOICE: &str = "-- Select --";

/// One pickable video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogVideo {
    pub id: u64,
    pub name: String,
}

impl From<&VideoRecord> for CatalogVideo {
    fn from(video: &VideoRecord) -> Self {
        Self {
            id: video.id,
            name: video.name.clone(),
        }
    }
}

/// A project entry: either a video directly under the project, or a
/// named section holding videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogItem {
    Video(CatalogVideo),
    Section {
        name: String,
        videos: Vec<CatalogVideo>,
    },
}

/// A single option in a rendered picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerEntry {
    /// Project the entry is listed under; `None` for the empty choice.
    pub group: Option<String>,
    pub value: String,
    pub label: String,
}

/// Videos of the selected projects, keyed by project name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VideoCatalog {
    projects: BTreeMap<String, Vec<CatalogItem>>,
}

impl VideoCatalog {
    /// Fetch project names and the videos of each selected project.
    ///
    /// Project ids the account does not list are labelled with the id
    /// itself. Any fetch failure aborts the whole build.
    pub async fn build<P>(provider: &P, project_ids: &[String]) -> Result<Self>
    where
        P: VideoProvider + ?Sized,
    {
        let names: BTreeMap<String, String> = provider
            .list_projects()
            .await?
            .into_iter()
            .map(|p| (p.id.to_string(), p.name))
            .collect();

        let mut catalog = Self::default();
        for project_id in project_ids {
            let videos = provider.list_project_videos(project_id).await?;
            let project_name = names
                .get(project_id)
                .cloned()
                .unwrap_or_else(|| project_id.clone());
            debug!(project_id = %project_id, count = videos.len(), "fetched project videos");
            for video in &videos {
                catalog.insert(&project_name, video);
            }
        }
        Ok(catalog)
    }

    /// File a video under its project, and under its section if it has one.
    pub fn insert(&mut self, project: &str, video: &VideoRecord) {
        let items = self.projects.entry(project.to_string()).or_default();
        let entry = CatalogVideo::from(video);

        let Some(section) = video.section.as_deref().filter(|s| !s.is_empty()) else {
            items.push(CatalogItem::Video(entry));
            return;
        };

        let existing = items.iter_mut().find_map(|item| match item {
            CatalogItem::Section { name, videos } if name == section => Some(videos),
            _ => None,
        });
        match existing {
            Some(videos) => videos.push(entry),
            None => items.push(CatalogItem::Section {
                name: section.to_string(),
                videos: vec![entry],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Project names in sorted order.
    pub fn project_names(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    pub fn project(&self, name: &str) -> Option<&[CatalogItem]> {
        self.projects.get(name).map(Vec::as_slice)
    }

    /// Flatten into picker options.
    ///
    /// Starts with the empty choice. Section headers carry a
    /// `section-<name>` value and a bracketed label; the videos under them
    /// are indented.
    pub fn picker_entries(&self) -> Vec<PickerEntry> {
        let mut entries = vec![PickerEntry {
            group: None,
            value: String::new(),
            label: EMPTY_CHOICE.to_string(),
        }];

        for (project, items) in &self.projects {
            let entry = |value: String, label: String| PickerEntry {
                group: Some(project.clone()),
                value,
                label,
            };
            for item in items {
                match item {
                    CatalogItem::Video(video) => {
                        entries.push(entry(video.id.to_string(), video.name.clone()));
                    }
                    CatalogItem::Section { name, videos } => {
                        entries.push(entry(format!("{SECTION_PREFIX}{name}"), format!("[{name}]")));
                        for video in videos {
                            entries.push(entry(video.id.to_string(), format!("    {}", video.name)));
                        }
                    }
                }
            }
        }
        entries
    }
}

/// Map a submitted picker value to a stored selection.
///
/// Section headers are not videos; selecting one stores nothing.
pub fn normalize_selection(value: &str) -> &str {
    let value = value.trim();
    if value.starts_with(SECTION_PREFIX) {
        ""
    } else {
        value
    }
}
