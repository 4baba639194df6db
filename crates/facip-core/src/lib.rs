mod app_config;
mod config;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, ScholarSettings};
pub use config::{load_app_config, load_app_config_from_env, load_app_config_with_overrides};

/// Browser-like identification sent with every profile fetch. Scholar pages
/// answer plain library user agents with a captcha interstitial.
pub const DEFAULT_SCHOLAR_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Upper bound on a single profile fetch, in seconds.
pub const DEFAULT_SCHOLAR_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
