//! Remote Job Scraper
//!
//! Fetches jobs matching a keyword from RemoteOK and Himalayas
//! and saves them to data/jobs.json

use anyhow::{Context, Result};
use clap::Parser;
use common::JobPosting;
use job_scraper::{Aggregator, ScraperConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "job-scraper", about = "Scrape remote job boards for a keyword")]
struct Args {
    /// Keyword to look for in titles, tags and descriptions
    #[arg(short, long, default_value = "python")]
    keyword: String,

    /// Maximum jobs kept per source
    #[arg(short, long, default_value_t = 5)]
    limit: usize,

    /// Where to write the scraped jobs
    #[arg(short, long, default_value = "data/jobs.json")]
    output: PathBuf,
}

fn print_job(index: usize, job: &JobPosting) {
    println!("{}. {}", index, job.title);
    println!("   Company: {}", job.company);
    println!("   Source: {}", job.source);
    println!("   Location: {}", job.location);
    if job.url.chars().count() > 50 {
        let short: String = job.url.chars().take(50).collect();
        println!("   URL: {}...", short);
    } else {
        println!("   URL: {}", job.url);
    }
    println!();
}

fn save_jobs(jobs: &[JobPosting], path: &Path) -> Result<()> {
    // Create data directory if it doesn't exist
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {:?}", dir))?;
            println!("📁 Created {:?} directory", dir);
        }
    }

    let json_output =
        serde_json::to_string_pretty(jobs).context("Failed to serialize jobs to JSON")?;
    fs::write(path, json_output).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    anyhow::ensure!(!args.keyword.trim().is_empty(), "keyword must not be empty");

    let config = ScraperConfig::from_env().context("Failed to load scraper configuration")?;

    println!("🔍 Scraping jobs for keyword: '{}'\n", args.keyword);

    let aggregator = Aggregator::from_config(&config).context("Failed to build HTTP client")?;
    let jobs = aggregator.run(&args.keyword, args.limit);

    println!("\n📊 Total jobs found: {}\n", jobs.len());
    for (i, job) in jobs.iter().enumerate() {
        print_job(i + 1, job);
    }

    save_jobs(&jobs, &args.output)?;
    println!("💾 Saved {} jobs to {:?}", jobs.len(), args.output);
    println!("\n✨ Scraping complete!");

    Ok(())
}
