//! Session configuration, read once from the environment at startup

use std::time::Duration;

/// Default pause between failed task attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("environment variable {key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

/// Settings fixed for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// Full chat-completions URL
    pub api_url: String,
    /// Bearer token (may be empty for unauthenticated local endpoints)
    pub api_token: String,
    /// Per-call network timeout; zero disables it
    pub timeout: Duration,
    /// Maximum generate/execute attempts per task
    pub max_retries: usize,
    /// Pause between failed attempts
    pub retry_delay: Duration,
    /// OTLP collector endpoint; tracing export is off when unset
    pub otlp_endpoint: Option<String>,
}

impl SessionConfig {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key → value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let timeout_secs: u64 = parse_number("TIMEOUT", required("TIMEOUT")?)?;
        let max_retries: usize = parse_number("RETRIES", required("RETRIES")?)?;
        let retry_delay = match lookup("RETRY_DELAY_MS").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Duration::from_millis(parse_number("RETRY_DELAY_MS", raw)?),
            None => DEFAULT_RETRY_DELAY,
        };

        Ok(Self {
            model: required("MODEL")?,
            api_url: required("API_URL")?,
            api_token: lookup("API_TOKEN").unwrap_or_default(),
            timeout: Duration::from_secs(timeout_secs),
            max_retries,
            retry_delay,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { key, value: raw })
}
