use crate::app_config::{AppConfig, RotationKind, API_KEYS_VAR};
use crate::ConfigError;

/// Load application configuration from environment variables already in the process.
///
/// Does NOT load `.env` files; the binary calls `dotenvy` once at startup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Tracing filter directive from `TWEETPULSE_LOG_LEVEL`, `info` when unset.
///
/// Independent of [`load_app_config_from_env`] so logging can start before
/// the rest of the configuration is validated.
#[must_use]
pub fn log_level_from_env() -> String {
    log_level(|key| std::env::var(key))
}

fn log_level<F>(lookup: F) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("TWEETPULSE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_keys = lookup(API_KEYS_VAR)
        .map(|raw| parse_api_keys(&raw))
        .unwrap_or_default();

    let search_base_url = or_default("TWEETPULSE_SEARCH_BASE_URL", "https://api.twitter.com/2/");
    let output_path = PathBuf::from(or_default("TWEETPULSE_OUTPUT_PATH", "tweets.json"));

    let target_count = parse_usize("TWEETPULSE_TARGET_COUNT", "20")?;
    if target_count == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TWEETPULSE_TARGET_COUNT".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let batch_delay_ms = parse_u64("TWEETPULSE_BATCH_DELAY_MS", "500")?;
    let request_delay_min_ms = parse_u64("TWEETPULSE_REQUEST_DELAY_MIN_MS", "1000")?;
    let request_delay_max_ms = parse_u64("TWEETPULSE_REQUEST_DELAY_MAX_MS", "2000")?;
    if request_delay_max_ms < request_delay_min_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "TWEETPULSE_REQUEST_DELAY_MAX_MS".to_string(),
            reason: format!("must be >= TWEETPULSE_REQUEST_DELAY_MIN_MS ({request_delay_min_ms})"),
        });
    }

    // 0 disables the cap.
    let max_retries = match parse_u32("TWEETPULSE_MAX_RETRIES", "10")? {
        0 => None,
        n => Some(n),
    };
    let request_timeout_secs = parse_u64("TWEETPULSE_REQUEST_TIMEOUT_SECS", "30")?;
    let run_timeout_secs = match parse_u64("TWEETPULSE_RUN_TIMEOUT_SECS", "200")? {
        0 => None,
        n => Some(n),
    };
    let rotation = parse_rotation(&or_default("TWEETPULSE_ROTATION", "random"))?;

    Ok(AppConfig {
        api_keys,
        search_base_url,
        output_path,
        target_count,
        batch_delay_ms,
        request_delay_min_ms,
        request_delay_max_ms,
        max_retries,
        request_timeout_secs,
        run_timeout_secs,
        rotation,
    })
}

/// Split a comma-separated key list, dropping blank entries.
fn parse_api_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_rotation(s: &str) -> Result<RotationKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "random" => Ok(RotationKind::Random),
        "round-robin" | "round_robin" | "roundrobin" => Ok(RotationKind::RoundRobin),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TWEETPULSE_ROTATION".to_string(),
            reason: format!("unknown rotation strategy '{other}' (expected random or round-robin)"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
