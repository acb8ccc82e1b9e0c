//! Error types for the dashboard client
//!
//! Uses thiserror for ergonomic error definitions.
//! Every variant ends up as a toast; none of them is fatal to the page.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Message shown when the server rejects a request without saying why
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Dashboard client errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failures (connection refused, CORS, aborted fetch)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reported by the backend, shown verbatim
    #[error("{0}")]
    Api(String),

    /// A success envelope whose payload lacks an expected field
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Form values that cannot be turned into a request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Persistent key-value storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Writing the host page
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Browser DOM errors
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Http(err.to_string())
    }
}
