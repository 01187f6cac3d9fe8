//! Shared job posting types used by the scraper and the API server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Location used when a source gives none (or an empty one).
pub const DEFAULT_LOCATION: &str = "Remote";

/// Company name used when a source gives none.
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Upstream job board a posting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "RemoteOK")]
    RemoteOk,
    #[serde(rename = "Himalayas")]
    Himalayas,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::RemoteOk, Source::Himalayas];

    /// Label stored alongside every posting.
    pub fn label(self) -> &'static str {
        match self {
            Source::RemoteOk => "RemoteOK",
            Source::Himalayas => "Himalayas",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSource(pub String);

impl fmt::Display for UnknownSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown job source: {}", self.0)
    }
}

impl std::error::Error for UnknownSource {}

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::ALL
            .into_iter()
            .find(|source| source.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSource(s.to_string()))
    }
}

/// A normalized job listing, independent of the board it was scraped from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub source: Source,
    pub scraped_at: DateTime<Utc>,
}

impl JobPosting {
    /// Builds a posting stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        url: impl Into<String>,
        source: Source,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            location: location.into(),
            url: url.into(),
            source,
            scraped_at: Utc::now(),
        }
    }
}

/// Returns the company name, or [`UNKNOWN_COMPANY`] when missing or empty.
pub fn company_or_unknown(company: Option<String>) -> String {
    non_empty(company).unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}

/// Returns the location, or [`DEFAULT_LOCATION`] when missing or empty.
pub fn location_or_remote(location: Option<String>) -> String {
    non_empty(location).unwrap_or_else(|| DEFAULT_LOCATION.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
