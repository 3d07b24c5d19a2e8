use std::env;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let backend_url = env::var("SEARCH_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let timeout = env::var("SEARCH_TIMEOUT_SECS").ok();
        let connect_timeout = env::var("SEARCH_CONNECT_TIMEOUT_SECS").ok();

        Ok(Config {
            backend_url: normalize_backend_url(&backend_url)?,
            request_timeout: parse_secs(timeout.as_deref(), DEFAULT_TIMEOUT_SECS, "SEARCH_TIMEOUT_SECS")?,
            connect_timeout: parse_secs(
                connect_timeout.as_deref(),
                DEFAULT_CONNECT_TIMEOUT_SECS,
                "SEARCH_CONNECT_TIMEOUT_SECS",
            )?,
        })
    }

    pub fn with_backend_url(mut self, url: &str) -> Result<Self> {
        self.backend_url = normalize_backend_url(url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, secs: u64) -> Result<Self> {
        if secs == 0 {
            return Err(AppError::ConfigError("Timeout must be greater than zero".to_string()));
        }
        self.request_timeout = Duration::from_secs(secs);
        Ok(self)
    }
}

fn normalize_backend_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AppError::ConfigError(format!("Invalid backend address: {}", raw)));
    }
    Ok(trimmed.to_string())
}

fn parse_secs(raw: Option<&str>, default: u64, key: &str) -> Result<Duration> {
    let secs = match raw {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", key, e)))?,
        None => default,
    };
    if secs == 0 {
        return Err(AppError::ConfigError(format!("{} must be greater than zero", key)));
    }
    Ok(Duration::from_secs(secs))
}
