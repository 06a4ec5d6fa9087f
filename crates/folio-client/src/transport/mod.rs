//! Transport layer for content requests
//!
//! - [`HttpTransport`]: reqwest against the real backend
//! - [`MockTransport`]: canned payloads for tests and offline demos

pub mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

/// Issues one GET and returns the decoded JSON body.
///
/// Implementations make exactly one attempt: no retries, no caching.
#[async_trait]
pub trait ContentTransport: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<Value>;
}
