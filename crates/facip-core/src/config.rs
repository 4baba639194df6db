use crate::app_config::{AppConfig, Environment, ScholarSettings};
use crate::{ConfigError, DEFAULT_SCHOLAR_USER_AGENT};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load application configuration, taking `overrides` ahead of the process
/// environment and `.env`.
///
/// Each override is a `(variable, value)` pair such as
/// `("FACIP_SCHOLAR_TIMEOUT_SECS", "5")`, so a command line flag replaces an
/// invalid environment value instead of failing on it.
///
/// # Errors
///
/// Returns `ConfigError` if a resolved value is invalid.
pub fn load_app_config_with_overrides(
    overrides: &[(&str, String)],
) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(overlay(overrides, |key| std::env::var(key)))
}

/// Lookup that answers from `overrides` first and falls back to `fallback`.
fn overlay<'a, F>(
    overrides: &'a [(&'a str, String)],
    fallback: F,
) -> impl Fn(&str) -> Result<String, std::env::VarError> + 'a
where
    F: Fn(&str) -> Result<String, std::env::VarError> + 'a,
{
    move |key| {
        overrides
            .iter()
            .find(|(var, _)| *var == key)
            .map_or_else(|| fallback(key), |(_, value)| Ok(value.clone()))
    }
}

/// Build application configuration using the provided env-var lookup function,
/// so tests can drive it from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("FACIP_ENV", "development"))?;

    let bind_addr = or_default("FACIP_BIND_ADDR", "0.0.0.0:8001")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("FACIP_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("FACIP_LOG_LEVEL", "info");

    let request_timeout_secs = or_default("FACIP_SCHOLAR_TIMEOUT_SECS", "10")
        .parse::<u64>()
        .map_err(|e| invalid("FACIP_SCHOLAR_TIMEOUT_SECS", e.to_string()))?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "FACIP_SCHOLAR_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }

    let user_agent = or_default("FACIP_SCHOLAR_USER_AGENT", DEFAULT_SCHOLAR_USER_AGENT);
    if user_agent.trim().is_empty() {
        return Err(invalid(
            "FACIP_SCHOLAR_USER_AGENT",
            "user agent must not be blank".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        scholar: ScholarSettings {
            request_timeout_secs,
            user_agent,
        },
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FACIP_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
