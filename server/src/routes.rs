//! REST API over the stored jobs, plus the scrape trigger.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use common::JobPosting;
use job_scraper::{Aggregator, ScraperConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::store::{JobStore, StoredJob};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: JobStore,
    pub scraper: ScraperConfig,
}

/// Body of POST /scrape
#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default = "default_keyword")]
    pub keyword: String,
    #[serde(default = "default_limit_per_source")]
    pub limit_per_source: usize,
}

fn default_keyword() -> String {
    "python".to_string()
}

fn default_limit_per_source() -> usize {
    10
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    pub message: String,
    pub jobs: Vec<JobPosting>,
}

/// API response wrapper for job listings
#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<StoredJob>,
    pub count: usize,
}

impl From<Vec<StoredJob>> for JobsResponse {
    fn from(jobs: Vec<StoredJob>) -> Self {
        Self {
            count: jobs.len(),
            jobs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default = "default_list_limit")]
    limit: i64,
}

fn default_list_limit() -> i64 {
    100
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    keyword: String,
}

/// Handler for GET / (root)
async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Job Aggregator API",
        "version": "1.0",
        "endpoints": {
            "/scrape": "POST - Scrape jobs by keyword",
            "/jobs": "GET - Get all stored jobs",
            "/jobs/search": "GET - Search jobs by keyword",
            "/jobs/source/{source}": "GET - Get jobs by source"
        }
    }))
}

/// Handler for POST /scrape
///
/// The scraper does blocking HTTP, so the whole run happens on a blocking
/// worker; the client is built and dropped there too.
async fn scrape_handler(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    if request.keyword.trim().is_empty() {
        return Err(ApiError::BadRequest("keyword must not be empty".to_string()));
    }

    let config = state.scraper.clone();
    let keyword = request.keyword.clone();
    let limit = request.limit_per_source;
    let jobs = tokio::task::spawn_blocking(move || {
        Aggregator::from_config(&config).map(|aggregator| aggregator.run(&keyword, limit))
    })
    .await??;

    let stored = state.store.insert_all(&jobs, &request.keyword).await?;
    tracing::info!(stored, keyword = %request.keyword, "Stored scraped jobs");

    Ok(Json(ScrapeResponse {
        success: true,
        message: format!(
            "Scraped {} jobs for keyword '{}'",
            jobs.len(),
            request.keyword
        ),
        jobs,
    }))
}

/// Handler for GET /jobs?limit=<n>
async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<JobsResponse>, ApiError> {
    let jobs = state.store.list(params.limit).await?;
    Ok(Json(jobs.into()))
}

/// Handler for GET /jobs/search?keyword=<k>
async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<JobsResponse>, ApiError> {
    let jobs = state.store.search(&params.keyword).await?;
    Ok(Json(jobs.into()))
}

/// Handler for GET /jobs/source/{source}
async fn source_handler(
    State(state): State<AppState>,
    Path(source): Path<String>,
) -> Result<Json<JobsResponse>, ApiError> {
    let jobs = state.store.by_source(&source).await?;
    Ok(Json(jobs.into()))
}

/// Handler for DELETE /jobs
async fn clear_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let removed = state.store.clear().await?;
    tracing::info!(removed, "Cleared stored jobs");
    Ok(Json(json!({ "success": true, "message": "All jobs cleared" })))
}

/// Builds the router the binary serves.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/scrape", post(scrape_handler))
        .route("/jobs", get(list_handler).delete(clear_handler))
        .route("/jobs/search", get(search_handler))
        .route("/jobs/source/{source}", get(source_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
