mod app_config;
mod config;

use thiserror::Error;

pub use app_config::{AppConfig, RotationKind};
pub use config::{load_app_config_from_env, log_level_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
