use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::http::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::sources::{himalayas, remoteok};

/// Pause between two consecutive sources during one aggregation run.
pub const DEFAULT_SOURCE_DELAY: Duration = Duration::from_secs(1);

/// Scraper settings, overridable from the environment
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub remoteok_url: String,
    pub himalayas_url: String,
    pub timeout: Duration,
    pub source_delay: Duration,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            remoteok_url: remoteok::DEFAULT_ENDPOINT.to_string(),
            himalayas_url: himalayas::DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            source_delay: DEFAULT_SOURCE_DELAY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        Ok(Self {
            remoteok_url: env::var("REMOTEOK_API_URL").unwrap_or(defaults.remoteok_url),
            himalayas_url: env::var("HIMALAYAS_API_URL").unwrap_or(defaults.himalayas_url),
            timeout: secs_var("SCRAPER_TIMEOUT_SECS")?.unwrap_or(defaults.timeout),
            source_delay: secs_var("SCRAPER_SOURCE_DELAY_SECS")?
                .unwrap_or(defaults.source_delay),
            user_agent: env::var("SCRAPER_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}

fn secs_var(name: &str) -> Result<Option<Duration>> {
    match env::var(name) {
        Ok(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{name} must be a whole number of seconds"))?;
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}
