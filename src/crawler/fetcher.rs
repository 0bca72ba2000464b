//! HTTP fetching
//!
//! One client per run, bounded timeouts, no retries: a failed or timed-out
//! request surfaces as `FetchFailed` carrying the URL and the cause.

use crate::{GleanError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds the HTTP client used for every fetch of a run.
pub fn build_http_client(
    user_agent: &str,
    request_timeout: Duration,
    connect_timeout: Duration,
) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body. Non-success status codes, connection errors, and
/// timeouts all classify as `FetchFailed`.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| GleanError::fetch_failed(url, e))?;

    let response = response
        .error_for_status()
        .map_err(|e| GleanError::fetch_failed(url, e))?;

    response
        .text()
        .await
        .map_err(|e| GleanError::fetch_failed(url, e))
}
