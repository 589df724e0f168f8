//! Telemetry metric name constants.
//!
//! Centralised metric names for wistia-embed operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `wistia_embed_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `endpoint`: API endpoint hit (e.g. "media", "projects", "medias")
//! - `status`: outcome: "ok" or "error"
//! - `type`: embed type rendered: "iframe", "api" or "popover"

/// Total API requests sent to the video host.
///
/// Labels: `endpoint`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "wistia_embed_requests_total";

/// API request duration in seconds.
///
/// Labels: `endpoint`.
pub const REQUEST_DURATION_SECONDS: &str = "wistia_embed_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `provider`, `operation`.
pub const RETRIES_TOTAL: &str = "wistia_embed_retries_total";

/// Total overrides rejected by their sanitizer and replaced with the default.
///
/// Labels: `option`.
pub const OPTION_FALLBACKS_TOTAL: &str = "wistia_embed_option_fallbacks_total";

/// Total embeds rendered.
///
/// Labels: `type`.
pub const RENDERS_TOTAL: &str = "wistia_embed_renders_total";
