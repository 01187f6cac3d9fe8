//! Keyword-filtered job fetching from the RemoteOK and Himalayas APIs.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod http;
pub mod sources;

pub use aggregator::Aggregator;
pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use sources::{JobSource, KeywordMatcher};
