//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wistia_embed::providers::{RetryConfig, RetryingVideoProvider};
use wistia_embed::{
    EmbedError, RawOverrides, Result, ServerContext, VideoField, VideoProvider, VideoRecord,
    WistiaClient, build_options, telemetry,
};

// ============================================================================
// Mock providers
// ============================================================================

struct StaticVideo;

#[async_trait]
impl VideoProvider for StaticVideo {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_video(&self, video_id: &str) -> Result<VideoRecord> {
        Ok(VideoRecord::new(1, video_id, "Static"))
    }
}

/// Fails with a 503 once, then succeeds.
struct FlakyOnce {
    calls: AtomicU32,
}

#[async_trait]
impl VideoProvider for FlakyOnce {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn fetch_video(&self, video_id: &str) -> Result<VideoRecord> {
        if self.calls.fetch_add(1, Ordering::Relaxed) == 0 {
            return Err(EmbedError::Api {
                status: 503,
                message: "unavailable".into(),
            });
        }
        Ok(VideoRecord::new(1, video_id, "Flaky"))
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Value of a counter's label, taken from the first matching entry.
fn counter_label(snapshot: &SnapshotVec, name: &str, label: &str) -> Option<String> {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .flat_map(|(key, _, _, _)| key.key().labels())
        .find(|l| l.key() == label)
        .map(|l| l.value().to_string())
}

fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn api_request_records_counter_and_histogram() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/medias/4242.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 4242, "hashed_id": "h4sh3d1d", "name": "Launch Trailer"
        })))
        .mount(&server)
        .await;
    let client = WistiaClient::with_base_url("abc123", server.uri()).unwrap();

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(client.fetch_video("4242"))
        })
    });
    assert!(result.is_ok());

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::REQUESTS_TOTAL), 1);
    assert_eq!(
        counter_label(&snapshot, telemetry::REQUESTS_TOTAL, "status").as_deref(),
        Some("ok")
    );
    assert!(has_histogram(&snapshot, telemetry::REQUEST_DURATION_SECONDS));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failed_api_request_records_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = WistiaClient::with_base_url("abc123", server.uri()).unwrap();

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let _result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(client.fetch_video("4242"))
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::REQUESTS_TOTAL), 1);
    assert_eq!(
        counter_label(&snapshot, telemetry::REQUESTS_TOTAL, "status").as_deref(),
        Some("error")
    );
}

#[test]
fn rejected_override_records_fallback() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let overrides = RawOverrides::new().with("videoWidth", "wide");
    let options = metrics::with_local_recorder(&recorder, || {
        build_options(&overrides, None, &ServerContext::default())
    })
    .unwrap();
    assert_eq!(options.int("general", "videoWidth"), Some(640));

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::OPTION_FALLBACKS_TOTAL), 1);
    assert_eq!(
        counter_label(&snapshot, telemetry::OPTION_FALLBACKS_TOTAL, "option").as_deref(),
        Some("videoWidth")
    );
}

#[test]
fn rejected_type_is_counted_once() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let overrides = RawOverrides::new().with("type", "bogus").with("ga", "yes");
    let options = metrics::with_local_recorder(&recorder, || {
        build_options(&overrides, None, &ServerContext::default())
    })
    .unwrap();
    assert_eq!(options.str("general", "type"), Some("iframe"));
    assert!(!options.has_group("ga"));

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::OPTION_FALLBACKS_TOTAL), 1);
    assert_eq!(
        counter_label(&snapshot, telemetry::OPTION_FALLBACKS_TOTAL, "option").as_deref(),
        Some("type")
    );
}

#[test]
fn accepted_overrides_record_no_fallback() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let overrides = RawOverrides::new().with("videoWidth", "800");
    metrics::with_local_recorder(&recorder, || {
        build_options(&overrides, None, &ServerContext::default())
    })
    .unwrap();

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::OPTION_FALLBACKS_TOTAL), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn render_records_embed_type() {
    let field = VideoField::new(Arc::new(StaticVideo));
    let overrides = RawOverrides::new().with("type", "popover");

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(field.embed("abc", &overrides))
        })
    });
    assert!(result.is_ok());

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::RENDERS_TOTAL), 1);
    assert_eq!(
        counter_label(&snapshot, telemetry::RENDERS_TOTAL, "type").as_deref(),
        Some("popover")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn retry_records_retry_counter() {
    let provider = RetryingVideoProvider::new(
        Arc::new(FlakyOnce {
            calls: AtomicU32::new(0),
        }),
        RetryConfig::new()
            .initial_delay(Duration::from_millis(1))
            .max_delay(Duration::from_millis(2)),
    );

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(provider.fetch_video("abc"))
        })
    });
    assert!(result.is_ok());

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::RETRIES_TOTAL), 1);
    assert_eq!(
        counter_label(&snapshot, telemetry::RETRIES_TOTAL, "provider").as_deref(),
        Some("flaky")
    );
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let field = VideoField::new(Arc::new(StaticVideo));
    field.embed("abc", &RawOverrides::new()).await.unwrap();
}
