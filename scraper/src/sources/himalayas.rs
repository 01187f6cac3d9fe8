//! Himalayas (https://himalayas.app) jobs API.

use common::{company_or_unknown, location_or_remote, JobPosting, Source};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{JobSource, KeywordMatcher};
use crate::error::ScrapeError;
use crate::http;

pub const DEFAULT_ENDPOINT: &str = "https://himalayas.app/jobs/api?limit=50";

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    jobs: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Listing {
    title: Option<String>,
    excerpt: Option<String>,
    categories: Option<Vec<String>>,
    location_restrictions: Option<Vec<String>>,
    company_name: Option<String>,
    application_link: Option<String>,
}

impl Listing {
    /// Title, excerpt or categories mention the keyword.
    fn is_match(&self, matcher: &KeywordMatcher) -> bool {
        let categories = self
            .categories
            .as_deref()
            .unwrap_or_default()
            .join(" ");

        matcher.matches(self.title.as_deref().unwrap_or_default())
            || matcher.matches(self.excerpt.as_deref().unwrap_or_default())
            || matcher.matches(&categories)
    }

    fn into_posting(self) -> JobPosting {
        let location = self
            .location_restrictions
            .filter(|locations| !locations.is_empty())
            .map(|locations| locations.join(", "));

        JobPosting::new(
            self.title.unwrap_or_default(),
            company_or_unknown(self.company_name),
            location_or_remote(location),
            self.application_link.unwrap_or_default(),
            Source::Himalayas,
        )
    }
}

pub struct HimalayasSource {
    client: Client,
    endpoint: String,
}

impl HimalayasSource {
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

impl JobSource for HimalayasSource {
    fn source(&self) -> Source {
        Source::Himalayas
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
    if !payload.is_object() {
        return Err(ScrapeError::UnexpectedShape(
            "Himalayas payload is not an object".to_string(),
        ));
    }
    let response: Response = serde_json::from_value(payload)?;

    let mut jobs = Vec::new();
    for entry in response.jobs {
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
