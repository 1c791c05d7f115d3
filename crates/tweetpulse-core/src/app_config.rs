use std::path::PathBuf;

use crate::ConfigError;

pub(crate) const API_KEYS_VAR: &str = "TWEETPULSE_API_KEYS";

/// How the fetcher picks an API key for each outbound search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationKind {
    /// Uniform random choice per call.
    Random,
    /// Cycle through the pool in order.
    RoundRobin,
}

impl std::fmt::Display for RotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationKind::Random => write!(f, "random"),
            RotationKind::RoundRobin => write!(f, "round-robin"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Bearer tokens for the search API. Empty when `TWEETPULSE_API_KEYS` is unset.
    pub api_keys: Vec<String>,
    pub search_base_url: String,
    pub output_path: PathBuf,
    pub target_count: usize,
    pub batch_delay_ms: u64,
    pub request_delay_min_ms: u64,
    pub request_delay_max_ms: u64,
    /// `None` means retry a failed batch until it succeeds.
    pub max_retries: Option<u32>,
    pub request_timeout_secs: u64,
    /// Budget for one whole fetch run. `None` means unlimited.
    pub run_timeout_secs: Option<u64>,
    pub rotation: RotationKind,
}

impl AppConfig {
    /// The configured API keys, which `fetch` cannot run without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if no key is configured.
    pub fn require_api_keys(&self) -> Result<&[String], ConfigError> {
        if self.api_keys.is_empty() {
            return Err(ConfigError::MissingEnvVar(API_KEYS_VAR.to_string()));
        }
        Ok(&self.api_keys)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_keys", &format!("[{} redacted]", self.api_keys.len()))
            .field("search_base_url", &self.search_base_url)
            .field("output_path", &self.output_path)
            .field("target_count", &self.target_count)
            .field("batch_delay_ms", &self.batch_delay_ms)
            .field("request_delay_min_ms", &self.request_delay_min_ms)
            .field("request_delay_max_ms", &self.request_delay_max_ms)
            .field("max_retries", &self.max_retries)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("run_timeout_secs", &self.run_timeout_secs)
            .field("rotation", &self.rotation)
            .finish()
    }
}
