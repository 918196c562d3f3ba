//! Connection settings for the Frigate instance.
//!
//! Settings are resolved once at process start from `FRIGATE_*` environment
//! variables and are immutable afterwards. Out-of-range values are hard
//! errors so the process fails before any transport is started.

use crate::error::{FrigateToolsError, Result};
use std::time::Duration;
use url::Url;

/// Prefix for all environment variables read by [`FrigateConfig`].
pub const ENV_PREFIX: &str = "FRIGATE_";

const DEFAULT_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 8000;

const MAX_TIMEOUT_SECS: u64 = 300;

/// Resolved connection settings.
///
/// | Variable | Default | Constraint |
/// |---|---|---|
/// | `FRIGATE_URL` | `http://localhost:5000` | absolute `http(s)` URL |
/// | `FRIGATE_API_KEY` | unset | |
/// | `FRIGATE_TIMEOUT` | `30` | seconds, 1–300 |
/// | `FRIGATE_SERVER_HOST` | `0.0.0.0` | |
/// | `FRIGATE_SERVER_PORT` | `8000` | 1–65535 |
#[derive(Debug, Clone)]
pub struct FrigateConfig {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    server_host: String,
    server_port: u16,
}

impl FrigateConfig {
    /// Resolve settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if `FRIGATE_URL` is not an absolute http(s)
    /// URL, or if `FRIGATE_TIMEOUT` / `FRIGATE_SERVER_PORT` fall outside
    /// their declared ranges.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an explicit lookup function.
    ///
    /// This is the seam `from_env` goes through; tests use it to avoid
    /// mutating the process environment.
    ///
    /// # Errors
    ///
    /// Same constraints as [`FrigateConfig::from_env`].
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}")).filter(|v| !v.is_empty());

        let raw_url = var("URL").unwrap_or_else(|| DEFAULT_URL.to_string());
        let base_url = validate_base_url(&raw_url)?;

        let timeout_secs = match var("TIMEOUT") {
            Some(raw) => parse_ranged("FRIGATE_TIMEOUT", &raw, 1, MAX_TIMEOUT_SECS)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let server_port = match var("SERVER_PORT") {
            Some(raw) => {
                let port = parse_ranged("FRIGATE_SERVER_PORT", &raw, 1, u64::from(u16::MAX))?;
                u16::try_from(port).map_err(|_| {
                    FrigateToolsError::Config(format!("FRIGATE_SERVER_PORT '{raw}' out of range"))
                })?
            }
            None => DEFAULT_SERVER_PORT,
        };

        Ok(Self {
            base_url,
            api_key: var("API_KEY"),
            timeout: Duration::from_secs(timeout_secs),
            server_host: var("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
        })
    }

    /// Frigate root URL, trailing slash stripped.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Frigate API root (`{base_url}/api`).
    #[must_use]
    pub fn api_base_url(&self) -> String {
        format!("{}/api", self.base_url)
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Per-request timeout for calls against the Frigate API.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Bind host for the streamable HTTP transport.
    #[must_use]
    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    /// Bind port for the streamable HTTP transport.
    #[must_use]
    pub fn server_port(&self) -> u16 {
        self.server_port
    }
}

fn validate_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw)
        .map_err(|e| FrigateToolsError::Config(format!("Invalid FRIGATE_URL '{raw}': {e}")))?;

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(FrigateToolsError::Config(format!(
            "Invalid FRIGATE_URL '{raw}': unsupported scheme '{scheme}'"
        )));
    }
    if url.host_str().is_none() {
        return Err(FrigateToolsError::Config(format!(
            "Invalid FRIGATE_URL '{raw}': missing host"
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_ranged(name: &str, raw: &str, min: u64, max: u64) -> Result<u64> {
    let value: u64 = raw.parse().map_err(|_| {
        FrigateToolsError::Config(format!("{name} '{raw}' is not a valid integer"))
    })?;
    if !(min..=max).contains(&value) {
        return Err(FrigateToolsError::Config(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(value)
}
