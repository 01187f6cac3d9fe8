//! Job Aggregator API Server
//!
//! Stores scraped jobs in SQLite and exposes them over a small REST API
//! using Axum.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

pub use config::Config;
pub use routes::{AppState, router};
pub use store::{JobStore, StoredJob};
