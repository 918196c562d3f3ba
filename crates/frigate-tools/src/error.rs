//! Error types for the Frigate tool runtime.

use thiserror::Error;

/// Failure conditions a tool call can surface.
///
/// `Http` and `Transport` are kept distinct so callers can tell "Frigate
/// rejected the request" apart from "Frigate is unreachable". Neither is
/// retried here.
#[derive(Error, Debug)]
pub enum FrigateToolsError {
    /// Configuration errors (invalid base URL, out-of-range settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Runtime errors (unknown tool, missing or malformed arguments)
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// The Frigate API answered with a non-success status
    #[error("Frigate API error: {0}")]
    Http(String),

    /// Network failure or timeout reaching the Frigate API
    #[error("Frigate transport error: {0}")]
    Transport(String),

    /// A referenced camera does not exist in the Frigate configuration
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for tool runtime operations.
pub type Result<T> = std::result::Result<T, FrigateToolsError>;

impl From<reqwest::Error> for FrigateToolsError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(crate::client::sanitize_reqwest_error(&value))
    }
}
