use anyhow::{Context, Result};
use job_server::{AppState, Config, JobStore, router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,job_server=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Job Aggregator API");

    let config = Config::from_env().context("Failed to load configuration")?;

    if let Some(dir) = config.database_dir() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create database directory {:?}", dir))?;
    }

    let store = JobStore::connect(&config.database_url)
        .await
        .context("Failed to open job database")?;
    tracing::info!(database = %config.database_url, "Database ready");

    let app = router(AppState {
        store,
        scraper: config.scraper.clone(),
    });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
