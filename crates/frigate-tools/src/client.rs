//! HTTP client construction for Frigate API calls.
//!
//! A client is built per tool invocation and dropped when the call returns;
//! nothing is held across calls. Connection reuse beyond that is left to
//! whatever reqwest provides within a single invocation.

use crate::config::FrigateConfig;
use crate::error::{FrigateToolsError, Result};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

/// Build a request-executing client for one tool invocation.
///
/// The client carries the configured request timeout and, when an API key is
/// set, an `Authorization: Bearer <key>` header on every request.
///
/// # Errors
///
/// Returns a `Config` error if the API key is not a valid header value, and
/// a `Transport` error if the underlying client cannot be constructed.
pub fn build_client(config: &FrigateConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    if let Some(key) = config.api_key() {
        let mut value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| {
            FrigateToolsError::Config("FRIGATE_API_KEY is not a valid header value".to_string())
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout())
        .build()
        .map_err(FrigateToolsError::from)
}

/// Render a reqwest error without leaking credentials or query strings
/// embedded in the request URL.
#[must_use]
pub fn sanitize_reqwest_error(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(url) = e.url() {
        let mut redacted = url.clone();
        let _ = redacted.set_username("");
        let _ = redacted.set_password(None);
        redacted.set_query(None);
        redacted.set_fragment(None);
        msg = msg.replace(url.as_str(), redacted.as_str());
    }
    msg
}
