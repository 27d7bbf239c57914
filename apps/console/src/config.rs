use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Client configuration loaded from environment variables.
/// Every variable has a default; malformed values fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub upload_timeout: Duration,
    pub fetch_timeout: Duration,
    pub list_limit: u32,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            upload_timeout: Duration::from_secs(30),
            fetch_timeout: Duration::from_secs(30),
            list_limit: 20,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            api_base_url: lookup("RESUME_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            upload_timeout: parse_or(&lookup, "UPLOAD_TIMEOUT_SECS", 30).map(Duration::from_secs)?,
            fetch_timeout: parse_or(&lookup, "FETCH_TIMEOUT_SECS", 30).map(Duration::from_secs)?,
            list_limit: parse_or(&lookup, "RESUME_LIST_LIMIT", defaults.list_limit)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
