//! Runs every source for one keyword and concatenates the results.

use common::JobPosting;
use std::thread;
use std::time::Duration;
use tracing::info;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::http;
use crate::sources::{HimalayasSource, JobSource, RemoteOkSource};

pub struct Aggregator {
    sources: Vec<Box<dyn JobSource>>,
    delay: Duration,
}

impl Aggregator {
    /// RemoteOK first, then Himalayas, sharing one HTTP client.
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let client = http::build_client(config)?;

        let sources: Vec<Box<dyn JobSource>> = vec![
            Box::new(RemoteOkSource::with_endpoint(
                client.clone(),
                config.remoteok_url.as_str(),
            )),
            Box::new(HimalayasSource::with_endpoint(
                client,
                config.himalayas_url.as_str(),
            )),
        ];

        Ok(Self::with_sources(sources, config.source_delay))
    }

    pub fn with_sources(sources: Vec<Box<dyn JobSource>>, delay: Duration) -> Self {
        Self { sources, delay }
    }

    /// Scrapes each source in turn, pausing `delay` between two sources.
    ///
    /// A failing source contributes no postings; it never stops the run.
    pub fn run(&self, keyword: &str, limit_per_source: usize) -> Vec<JobPosting> {
        let mut all_jobs = Vec::new();

        for (i, source) in self.sources.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }

            info!(source = %source.source(), keyword, "Scraping source");
            let jobs = source.scrape(keyword, limit_per_source);
            info!(source = %source.source(), found = jobs.len(), "Source done");
            all_jobs.extend(jobs);
        }

        info!(total = all_jobs.len(), keyword, "Found jobs across all sources");
        all_jobs
    }
}
