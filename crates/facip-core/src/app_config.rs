use std::net::SocketAddr;

use crate::{DEFAULT_SCHOLAR_TIMEOUT_SECS, DEFAULT_SCHOLAR_USER_AGENT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Knobs for the outbound profile fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScholarSettings {
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ScholarSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_SCHOLAR_TIMEOUT_SECS,
            user_agent: DEFAULT_SCHOLAR_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub scholar: ScholarSettings,
}

impl AppConfig {
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.env == Environment::Development
    }
}
