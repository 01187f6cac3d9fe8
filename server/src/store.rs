//! SQLite storage for scraped jobs.
//!
//! One flat `jobs` table. Every scrape appends rows; nothing is
//! deduplicated or updated.

use chrono::{DateTime, Utc};
use common::JobPosting;
use serde::Serialize;
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const JOB_COLUMNS: &str = "id, title, company, location, url, source, scraped_at, keyword";

/// A job row as stored, with its assigned id and the keyword it was scraped for.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoredJob {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub scraped_at: Option<DateTime<Utc>>,
    pub keyword: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JobStore {
    pool: SqlitePool,
}

impl JobStore {
    /// Opens (creating if needed) the database at `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// In-memory store (for testing). A single long-lived connection keeps
    /// the database alive.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                company TEXT NOT NULL,
                location TEXT,
                url TEXT,
                source TEXT,
                scraped_at TEXT,
                keyword TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts all postings in one transaction, tagging each with `keyword`.
    pub async fn insert_all(&self, jobs: &[JobPosting], keyword: &str) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for job in jobs {
            inserted += sqlx::query(
                r#"
                INSERT INTO jobs (title, company, location, url, source, scraped_at, keyword)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&job.title)
            .bind(&job.company)
            .bind(&job.location)
            .bind(&job.url)
            .bind(job.source.label())
            .bind(job.scraped_at)
            .bind(keyword)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Newest jobs first, at most `limit`.
    pub async fn list(&self, limit: i64) -> Result<Vec<StoredJob>, sqlx::Error> {
        sqlx::query_as::<_, StoredJob>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY id DESC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Jobs whose scrape keyword, title or company contains `keyword`.
    pub async fn search(&self, keyword: &str) -> Result<Vec<StoredJob>, sqlx::Error> {
        let pattern = format!("%{keyword}%");
        sqlx::query_as::<_, StoredJob>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs \
             WHERE keyword LIKE ? OR title LIKE ? OR company LIKE ? \
             ORDER BY id DESC"
        ))
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn by_source(&self, source: &str) -> Result<Vec<StoredJob>, sqlx::Error> {
        sqlx::query_as::<_, StoredJob>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE source = ? ORDER BY id DESC"
        ))
        .bind(source)
        .fetch_all(&self.pool)
        .await
    }

    /// Deletes every job, returning how many were removed.
    pub async fn clear(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
