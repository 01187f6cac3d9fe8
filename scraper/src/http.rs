//! Outbound HTTP client shared by every source.

use reqwest::blocking::Client;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;

/// Browser-like User-Agent; some boards reject unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the blocking client with the configured timeout and User-Agent.
pub fn build_client(config: &ScraperConfig) -> Result<Client, ScrapeError> {
    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// GETs `url` and returns the body, treating non-2xx responses as failures.
pub fn get_text(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.text()?)
}
