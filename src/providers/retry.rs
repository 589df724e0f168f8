//! Retry configuration, delay calculation, and the provider decorator.
//!
//! The options core never retries; remote fetches do, here. Provides
//! [`RetryConfig`] for controlling retry behaviour and
//! [`RetryingVideoProvider`], which wraps any [`VideoProvider`] with
//! automatic retry on transient errors.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::telemetry;
use crate::traits::VideoProvider;
use crate::types::{Project, VideoRecord};
use crate::Result;

/// Configuration for retry behaviour on transient errors.
///
/// Uses exponential backoff capped at `max_delay`:
///
/// ```rust
/// # use wistia_embed::providers::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(5)
///     .initial_delay(Duration::from_millis(200));
/// assert_eq!(config.delay_for_attempt(1), Duration::from_millis(400));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 3.
    pub max_attempts: u32,
    /// Base delay before the first retry. Default: 500ms.
    pub initial_delay: Duration,
    /// Maximum delay between retries (caps exponential growth). Default: 10s.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Backoff for a given attempt number (0-indexed):
    /// `initial_delay * 2^attempt`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Backoff, unless the server sent a `retry-after` hint.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        retry_after.unwrap_or_else(|| self.delay_for_attempt(attempt))
    }
}

/// Execute an async operation with retry logic.
///
/// Retries on transient errors (as classified by [`crate::EmbedError::is_transient()`])
/// up to `config.max_attempts`. Permanent errors are returned immediately.
pub(crate) async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    provider_name: &str,
    operation: &str,
    f: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = config.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() && attempt + 1 < attempts => {
                metrics::counter!(telemetry::RETRIES_TOTAL,
                    "provider" => provider_name.to_owned(),
                    "operation" => operation.to_owned(),
                )
                .increment(1);
                let delay = config.effective_delay(attempt, e.retry_after());
                warn!(
                    provider = provider_name,
                    operation,
                    attempt = attempt + 1,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "retrying after transient error"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Decorator that wraps a [`VideoProvider`] with retry logic.
///
/// Transient errors are retried with exponential backoff; a `retry-after`
/// hint from a rate-limited response takes precedence over the backoff.
pub struct RetryingVideoProvider {
    inner: Arc<dyn VideoProvider>,
    config: RetryConfig,
}

impl RetryingVideoProvider {
    pub fn new(inner: Arc<dyn VideoProvider>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl VideoProvider for RetryingVideoProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch_video(&self, video_id: &str) -> Result<VideoRecord> {
        with_retry(&self.config, self.inner.name(), "fetch_video", || {
            self.inner.fetch_video(video_id)
        })
        .await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        with_retry(&self.config, self.inner.name(), "list_projects", || {
            self.inner.list_projects()
        })
        .await
    }

    async fn list_project_videos(&self, project_id: &str) -> Result<Vec<VideoRecord>> {
        with_retry(&self.config, self.inner.name(), "list_project_videos", || {
            self.inner.list_project_videos(project_id)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_capped() {
        let config = RetryConfig::new()
            .initial_delay(Duration::from_secs(1))
            .max_delay(Duration::from_secs(5));
        assert_eq!(config.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(config.delay_for_attempt(3), Duration::from_secs(5));
    }

    #[test]
    fn retry_after_hint_wins() {
        let config = RetryConfig::new();
        assert_eq!(
            config.effective_delay(0, Some(Duration::from_secs(7))),
            Duration::from_secs(7)
        );
    }
}
