//! RemoteOK (https://remoteok.com) JSON API.
//!
//! The API returns an array whose first element is a legal/metadata notice;
//! listings start at index 1.

use common::{company_or_unknown, location_or_remote, JobPosting, Source};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{JobSource, KeywordMatcher};
use crate::error::ScrapeError;
use crate::http;

pub const DEFAULT_ENDPOINT: &str = "https://remoteok.com/api";

#[derive(Debug, Deserialize)]
struct Listing {
    position: Option<String>,
    company: Option<String>,
    location: Option<String>,
    url: Option<String>,
    tags: Option<Vec<String>>,
    description: Option<String>,
}

impl Listing {
    /// Title, tags or description mention the keyword.
    fn is_match(&self, matcher: &KeywordMatcher) -> bool {
        matcher.matches(self.position.as_deref().unwrap_or_default())
            || matcher.matches_any_tag(self.tags.as_deref().unwrap_or_default())
            || matcher.matches(self.description.as_deref().unwrap_or_default())
    }

    fn into_posting(self) -> JobPosting {
        JobPosting::new(
            self.position.unwrap_or_default(),
            company_or_unknown(self.company),
            location_or_remote(self.location),
            self.url.unwrap_or_default(),
            Source::RemoteOk,
        )
    }
}

pub struct RemoteOkSource {
    client: Client,
    endpoint: String,
}

impl RemoteOkSource {
    pub fn new(client: Client) -> Self {
        Self::with_endpoint(client, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl JobSource for RemoteOkSource {
    fn source(&self) -> Source {
        Source::RemoteOk
    }

    fn fetch_matching(&self, keyword: &str, limit: usize) -> Result<Vec<JobPosting>, ScrapeError> {
        let body = http::get_text(&self.client, &self.endpoint)?;
        parse_listings(&body, &KeywordMatcher::new(keyword), limit)
    }
}

/// Picks the first `limit` matching listings out of a raw API payload.
pub fn parse_listings(
    body: &str,
    matcher: &KeywordMatcher,
    limit: usize,
) -> Result<Vec<JobPosting>, ScrapeError> {
    let payload: Value = serde_json::from_str(body)?;
    let Value::Array(entries) = payload else {
        return Err(ScrapeError::UnexpectedShape(
            "RemoteOK payload is not an array".to_string(),
        ));
    };

    let mut jobs = Vec::new();
    // Skip the metadata entry
    for entry in entries.into_iter().skip(1) {
        if jobs.len() >= limit {
            break;
        }

        // A malformed entry fails the whole source
        let listing: Listing = serde_json::from_value(entry)?;

        if listing.is_match(matcher) {
            jobs.push(listing.into_posting());
        }
    }

    Ok(jobs)
}
