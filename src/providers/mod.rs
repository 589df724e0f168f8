//! Video metadata providers.
//!
//! [`WistiaClient`] talks to the hosted Data API. [`RetryingVideoProvider`]
//! wraps any provider with backoff on transient failures.

pub mod retry;
pub mod wistia;

pub use retry::{RetryConfig, RetryingVideoProvider};
pub use wistia::WistiaClient;
