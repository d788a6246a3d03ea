//! Connection settings for the Brands API.
//!
//! Values come from built-in defaults, then `BRANDS_API_*` environment
//! variables, then command-line overrides.

use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.practicesoftwaretesting.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub const BASE_URL_VAR: &str = "BRANDS_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "BRANDS_API_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl Config {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary lookup so tests don't have to
    /// mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.base_url = normalize_base_url(&base_url)?;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.timeout = parse_timeout(&raw)?;
        }

        Ok(config)
    }

    pub fn override_base_url(&mut self, base_url: Option<&str>) -> Result<()> {
        if let Some(base_url) = base_url {
            self.base_url = normalize_base_url(base_url)?;
        }
        Ok(())
    }

    pub fn override_timeout_ms(&mut self, timeout_ms: Option<u64>) -> Result<()> {
        if let Some(ms) = timeout_ms {
            if ms == 0 {
                return Err(Error::Config("timeout must be greater than zero".into()));
            }
            self.timeout = Duration::from_millis(ms);
        }
        Ok(())
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config(format!("{BASE_URL_VAR} cannot be empty")));
    }

    reqwest::Url::parse(trimmed).map_err(|e| Error::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    Ok(trimmed.to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let ms: u64 = raw
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{TIMEOUT_VAR} must be a number of milliseconds: {e}")))?;
    if ms == 0 {
        return Err(Error::Config(format!("{TIMEOUT_VAR} must be greater than zero")));
    }
    Ok(Duration::from_millis(ms))
}
