//! Configuration module for the restaurant directory client.
//!
//! All configuration is loaded from environment variables with sensible defaults.
//! Command-line flags may override individual values after loading.

use std::env;
use std::time::Duration;

use crate::errors::AppError;

/// Default backend address used when `RESTAURANTS_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Default number of restaurants requested per page.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Default lifetime of the error notification.
pub const DEFAULT_TOAST_SECS: u64 = 5;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST backend (the `/api` prefix is appended by the client)
    pub api_url: String,
    /// Page size sent with every list request
    pub per_page: u32,
    /// How long the error notification stays visible
    pub toast_duration: Duration,
    /// Optional per-request timeout; requests never time out when unset
    pub request_timeout: Option<Duration>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            toast_duration: Duration::from_secs(DEFAULT_TOAST_SECS),
            request_timeout: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and a `.env` file if present).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("RESTAURANTS_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let per_page = match lookup("RESTAURANTS_PER_PAGE") {
            Some(raw) => parse_positive(&raw, "RESTAURANTS_PER_PAGE")?,
            None => defaults.per_page,
        };

        let toast_duration = match lookup("RESTAURANTS_TOAST_SECS") {
            Some(raw) => Duration::from_secs(parse_positive(&raw, "RESTAURANTS_TOAST_SECS")?.into()),
            None => defaults.toast_duration,
        };

        let request_timeout = lookup("RESTAURANTS_TIMEOUT_SECS")
            .map(|raw| parse_positive(&raw, "RESTAURANTS_TIMEOUT_SECS"))
            .transpose()?
            .map(|secs| Duration::from_secs(secs.into()));

        let log_level = lookup("RESTAURANTS_LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Self {
            api_url,
            per_page,
            toast_duration,
            request_timeout,
            log_level,
        })
    }
}

fn parse_positive(raw: &str, key: &str) -> Result<u32, AppError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(AppError::Config(format!(
            "{} must be a positive integer, got {:?}",
            key, raw
        ))),
    }
}
