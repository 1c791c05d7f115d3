use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single call to the external search capability.
///
/// The accumulator treats every variant as transient: the call is retried
/// with a freshly selected credential.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by search API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("search API rejected credential (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// A 2xx response that carried only an `errors` array.
    #[error("search API error: {0}")]
    Api(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("search call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u128 },

    #[error("invalid search base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Terminal errors for an accumulation run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Required input missing or invalid; raised before any network activity.
    #[error("usage error: {0}")]
    Usage(String),

    #[error("no English tweets found for topic '{topic}'")]
    NoResults { topic: String },

    #[error("credential pool is empty; set TWEETPULSE_API_KEYS")]
    EmptyCredentialPool,

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
