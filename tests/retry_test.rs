use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use wistia_embed::providers::{RetryConfig, RetryingVideoProvider};
use wistia_embed::types::Project;
use wistia_embed::{EmbedError, Result, VideoProvider, VideoRecord};

/// Mock provider that fails N times then succeeds.
struct FailThenSucceed {
    fail_count: AtomicU32,
    fail_with: fn() -> EmbedError,
    total_calls: AtomicU32,
}

impl FailThenSucceed {
    fn new(failures: u32, fail_with: fn() -> EmbedError) -> Self {
        Self {
            fail_count: AtomicU32::new(failures),
            fail_with,
            total_calls: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> u32 {
        self.total_calls.load(Ordering::Relaxed)
    }

    fn attempt(&self) -> Result<()> {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        let remaining = self.fail_count.load(Ordering::Relaxed);
        if remaining > 0 {
            self.fail_count.fetch_sub(1, Ordering::Relaxed);
            return Err((self.fail_with)());
        }
        Ok(())
    }
}

#[async_trait]
impl VideoProvider for FailThenSucceed {
    fn name(&self) -> &str {
        "mock-retry"
    }

    async fn fetch_video(&self, video_id: &str) -> Result<VideoRecord> {
        self.attempt()?;
        Ok(VideoRecord::new(1, video_id, "ok"))
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.attempt()?;
        Ok(vec![])
    }
}

fn fast_config(max_attempts: u32) -> RetryConfig {
    RetryConfig::new()
        .max_attempts(max_attempts)
        .initial_delay(Duration::from_millis(1))
        .max_delay(Duration::from_millis(5))
}

#[tokio::test]
async fn retries_on_transient_error_then_succeeds() {
    let inner = Arc::new(FailThenSucceed::new(2, || EmbedError::RateLimited {
        retry_after: None,
    }));
    let provider = RetryingVideoProvider::new(inner.clone(), fast_config(3));

    let video = provider.fetch_video("abc").await.unwrap();
    assert_eq!(video.hashed_id, "abc");
    assert_eq!(inner.call_count(), 3);
}

#[tokio::test]
async fn gives_up_after_max_attempts() {
    let inner = Arc::new(FailThenSucceed::new(10, || EmbedError::Api {
        status: 502,
        message: "bad gateway".into(),
    }));
    let provider = RetryingVideoProvider::new(inner.clone(), fast_config(3));

    let err = provider.fetch_video("abc").await.unwrap_err();
    assert!(matches!(err, EmbedError::Api { status: 502, .. }));
    assert_eq!(inner.call_count(), 3);
}

#[tokio::test]
async fn permanent_errors_are_not_retried() {
    let inner = Arc::new(FailThenSucceed::new(1, || EmbedError::AuthenticationFailed));
    let provider = RetryingVideoProvider::new(inner.clone(), fast_config(5));

    let err = provider.list_projects().await.unwrap_err();
    assert!(matches!(err, EmbedError::AuthenticationFailed));
    assert_eq!(inner.call_count(), 1);
}

#[tokio::test]
async fn disabled_config_makes_a_single_attempt() {
    let inner = Arc::new(FailThenSucceed::new(1, || EmbedError::Http("reset".into())));
    let provider = RetryingVideoProvider::new(inner.clone(), RetryConfig::disabled());

    assert!(provider.fetch_video("abc").await.is_err());
    assert_eq!(inner.call_count(), 1);
}

#[tokio::test]
async fn zero_attempts_still_tries_once() {
    let inner = Arc::new(FailThenSucceed::new(0, || EmbedError::Http("reset".into())));
    let provider = RetryingVideoProvider::new(inner.clone(), fast_config(0));

    assert!(provider.fetch_video("abc").await.is_ok());
    assert_eq!(inner.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn retry_after_hint_is_honoured() {
    let inner = Arc::new(FailThenSucceed::new(1, || EmbedError::RateLimited {
        retry_after: Some(Duration::from_secs(30)),
    }));
    let provider = RetryingVideoProvider::new(inner.clone(), fast_config(2));

    let start = tokio::time::Instant::now();
    provider.fetch_video("abc").await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(30));
}

#[tokio::test]
async fn unimplemented_operations_are_not_retried() {
    let inner = Arc::new(FailThenSucceed::new(0, || EmbedError::Http("reset".into())));
    let provider = RetryingVideoProvider::new(inner.clone(), fast_config(3));

    let err = provider.list_project_videos("7").await.unwrap_err();
    assert!(matches!(err, EmbedError::NotImplemented("list_project_videos")));
    assert_eq!(provider.name(), "mock-retry");
}

#[test]
fn exponential_backoff() {
    let config = RetryConfig::new()
        .initial_delay(Duration::from_millis(100))
        .max_delay(Duration::from_secs(1));
    assert_eq!(config.delay_for_attempt(0), Duration::from_millis(100));
    assert_eq!(config.delay_for_attempt(1), Duration::from_millis(200));
    assert_eq!(config.delay_for_attempt(2), Duration::from_millis(400));
    assert_eq!(config.delay_for_attempt(10), Duration::from_secs(1));
    assert_eq!(config.effective_delay(0, None), Duration::from_millis(100));
}

#[test]
fn default_config() {
    let config = RetryConfig::default();
    assert_eq!(config.max_attempts, 3);
    assert_eq!(config.initial_delay, Duration::from_millis(500));
    assert_eq!(config.max_delay, Duration::from_secs(10));
}
