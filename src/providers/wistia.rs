//! Wistia Data API client.
//!
//! See: <https://wistia.com/support/developers/data-api>

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::telemetry;
use crate::traits::VideoProvider;
use crate::types::{Project, VideoRecord};
use crate::{EmbedError, Result};

/// Default base URL for the Wistia Data API
pub const DEFAULT_BASE_URL: &str = "https://api.wistia.com/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Wistia Data API.
///
/// Authenticates with HTTP basic auth (user `api`, password = API key).
/// The project list is fetched at most once per client and kept for the
/// client's lifetime.
pub struct WistiaClient {
    api_key: String,
    http: Client,
    base_url: String,
    projects: OnceCell<Vec<Project>>,
}

impl WistiaClient {
    /// Create a client against the public API.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom base URL and request timeout.
    pub fn with_config(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        validate_api_key(&api_key)?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbedError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            projects: OnceCell::new(),
        })
    }

    /// GET `path` under the base URL and decode the JSON body.
    ///
    /// `endpoint` labels metrics; `subject` names the resource in 404 errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, &str)],
        subject: &str,
    ) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        let start = Instant::now();

        let result = async {
            let response = self
                .http
                .get(&url)
                .basic_auth("api", Some(&self.api_key))
                .query(query)
                .send()
                .await?;

            handle_response_errors(&response, subject)?;

            Ok::<T, EmbedError>(response.json::<T>().await?)
        }
        .await;

        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::REQUESTS_TOTAL, "endpoint" => endpoint, "status" => status)
            .increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "endpoint" => endpoint)
            .record(start.elapsed().as_secs_f64());

        match &result {
            Ok(_) => debug!(endpoint, path, "API request succeeded"),
            Err(e) => warn!(endpoint, path, error = %e, "API request failed"),
        }
        result
    }
}

#[async_trait]
impl VideoProvider for WistiaClient {
    fn name(&self) -> &str {
        "wistia"
    }

    async fn fetch_video(&self, video_id: &str) -> Result<VideoRecord> {
        let video_id = video_id.trim();
        if video_id.is_empty()
            || video_id == "0"
            || !video_id.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(EmbedError::InvalidVideoId(video_id.to_string()));
        }
        self.get_json("media", &format!("medias/{video_id}.json"), &[], video_id)
            .await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.projects
            .get_or_try_init(|| async {
                self.get_json("projects", "projects.json", &[("sort_by", "name")], "projects")
                    .await
            })
            .await
            .cloned()
    }

    async fn list_project_videos(&self, project_id: &str) -> Result<Vec<VideoRecord>> {
        self.get_json(
            "medias",
            "medias.json",
            &[("sort_by", "name"), ("project_id", project_id)],
            project_id,
        )
        .await
    }
}

/// Reject empty and non-hexadecimal keys before any request is made.
fn validate_api_key(api_key: &str) -> Result<()> {
    if api_key.is_empty() {
        return Err(EmbedError::MissingApiKey);
    }
    if !api_key.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EmbedError::MalformedApiKey);
    }
    Ok(())
}

fn handle_response_errors(response: &Response, subject: &str) -> Result<()> {
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    match status.as_u16() {
        401 | 403 => Err(EmbedError::AuthenticationFailed),
        404 => Err(EmbedError::VideoNotFound(subject.to_string())),
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs);
            Err(EmbedError::RateLimited { retry_after })
        }
        code => Err(EmbedError::Api {
            status: code,
            message: format!("Wistia API error: {status}"),
        }),
    }
}
