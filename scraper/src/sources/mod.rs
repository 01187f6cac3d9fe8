//! Upstream job boards.
//!
//! Each source fetches one JSON endpoint and keeps the first `limit`
//! entries matching the keyword, in the order the board returned them.

pub mod himalayas;
pub mod remoteok;

use common::{JobPosting, Source};
use tracing::warn;

use crate::error::ScrapeError;

pub use himalayas::HimalayasSource;
pub use remoteok::RemoteOkSource;

pub trait JobSource: Send + Sync {
    fn source(&self) -> Source;

    /// Fetches the board and returns matching postings, or the failure.
    fn fetch_matching(&self, keyword: &str, limit: usize) -> Result<Vec<JobPosting>, ScrapeError>;

    /// Like [`JobSource::fetch_matching`] but never fails: errors are
    /// logged and the source contributes nothing.
    fn scrape(&self, keyword: &str, limit: usize) -> Vec<JobPosting> {
        match self.fetch_matching(keyword, limit) {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!(source = %self.source(), error = %e, "Error scraping source");
                Vec::new()
            }
        }
    }
}

/// Case-insensitive keyword test shared by all sources.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    needle: String,
}

impl KeywordMatcher {
    pub fn new(keyword: &str) -> Self {
        Self {
            needle: keyword.to_lowercase(),
        }
    }

    /// Keyword appears anywhere in `text`.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.needle)
    }

    /// Keyword equals one of the tags.
    pub fn matches_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| tag.to_lowercase() == self.needle)
    }
}
