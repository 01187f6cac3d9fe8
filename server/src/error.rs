use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use job_scraper::ScrapeError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("scraper setup failed: {0}")]
    Scraper(#[from] ScrapeError),

    #[error("scrape task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => {
                tracing::error!(error = %self, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
