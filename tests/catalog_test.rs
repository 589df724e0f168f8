use std::collections::HashMap;

use async_trait::async_trait;
use wistia_embed::catalog::{CatalogItem, EMPTY_CHOICE, PickerEntry};
use wistia_embed::types::Project;
use wistia_embed::{
    EmbedError, Result, VideoCatalog, VideoProvider, VideoRecord, normalize_selection,
};

/// In-memory provider: fixed projects and per-project videos.
struct StaticProvider {
    projects: Vec<Project>,
    videos: HashMap<String, Vec<VideoRecord>>,
}

#[async_trait]
impl VideoProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_video(&self, video_id: &str) -> Result<VideoRecord> {
        Err(EmbedError::VideoNotFound(video_id.to_string()))
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    async fn list_project_videos(&self, project_id: &str) -> Result<Vec<VideoRecord>> {
        self.videos
            .get(project_id)
            .cloned()
            .ok_or_else(|| EmbedError::Api {
                status: 404,
                message: format!("no project {project_id}"),
            })
    }
}

fn project(id: u64, name: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
        hashed_id: None,
        media_count: None,
    }
}

fn video(id: u64, name: &str, section: Option<&str>) -> VideoRecord {
    let mut video = VideoRecord::new(id, format!("h{id}"), name);
    video.section = section.map(str::to_string);
    video
}

fn provider() -> StaticProvider {
    let mut videos = HashMap::new();
    videos.insert(
        "7".to_string(),
        vec![
            video(1, "Intro", Some("Basics")),
            video(2, "Pricing", None),
            video(3, "Setup", Some("Basics")),
        ],
    );
    videos.insert("9".to_string(), vec![video(4, "Q&A", None)]);
    videos.insert("11".to_string(), vec![video(5, "Orphan", None)]);
    StaticProvider {
        projects: vec![project(9, "Alpha Webinars"), project(7, "Website")],
        videos,
    }
}

#[tokio::test]
async fn catalog_groups_by_project_name_sorted() {
    let ids = vec!["7".to_string(), "9".to_string()];
    let catalog = VideoCatalog::build(&provider(), &ids).await.unwrap();

    let names: Vec<&str> = catalog.project_names().collect();
    assert_eq!(names, vec!["Alpha Webinars", "Website"]);

    let website = catalog.project("Website").unwrap();
    assert_eq!(website.len(), 2);
    assert!(matches!(&website[0], CatalogItem::Section { name, videos } if name == "Basics" && videos.len() == 2));
    assert!(matches!(&website[1], CatalogItem::Video(v) if v.name == "Pricing"));
}

#[tokio::test]
async fn unknown_project_is_labelled_by_id() {
    let ids = vec!["11".to_string()];
    let catalog = VideoCatalog::build(&provider(), &ids).await.unwrap();
    assert_eq!(catalog.project_names().collect::<Vec<_>>(), vec!["11"]);
}

#[tokio::test]
async fn fetch_failure_aborts_build() {
    let ids = vec!["7".to_string(), "404".to_string()];
    let err = VideoCatalog::build(&provider(), &ids).await.unwrap_err();
    assert!(matches!(err, EmbedError::Api { status: 404, .. }));
}

#[tokio::test]
async fn no_projects_selected_is_empty() {
    let catalog = VideoCatalog::build(&provider(), &[]).await.unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.picker_entries().len(), 1);
}

#[tokio::test]
async fn picker_entries_mark_sections() {
    let ids = vec!["7".to_string()];
    let catalog = VideoCatalog::build(&provider(), &ids).await.unwrap();
    let entries = catalog.picker_entries();

    let entry = |group: Option<&str>, value: &str, label: &str| PickerEntry {
        group: group.map(str::to_string),
        value: value.to_string(),
        label: label.to_string(),
    };
    assert_eq!(
        entries,
        vec![
            entry(None, "", EMPTY_CHOICE),
            entry(Some("Website"), "section-Basics", "[Basics]"),
            entry(Some("Website"), "1", "    Intro"),
            entry(Some("Website"), "3", "    Setup"),
            entry(Some("Website"), "2", "Pricing"),
        ]
    );
}

#[test]
fn section_selection_is_normalized_to_empty() {
    assert_eq!(normalize_selection("section-Basics"), "");
    assert_eq!(normalize_selection(" 1234 "), "1234");
    assert_eq!(normalize_selection(""), "");
}

#[tokio::test]
async fn catalog_serializes_for_the_picker() {
    let ids = vec!["9".to_string()];
    let catalog = VideoCatalog::build(&provider(), &ids).await.unwrap();
    let json = serde_json::to_value(&catalog).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "Alpha Webinars": [{ "kind": "video", "id": 4, "name": "Q&A" }]
        })
    );
}
