// HTTP-level tests for the API router without opening sockets.
// Upstream job boards are mockito servers; storage is in-memory SQLite.

use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use job_scraper::ScraperConfig;
use job_server::{AppState, JobStore, router};
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt as _;

const BODY_LIMIT: usize = 1024 * 1024;

const REMOTEOK_BODY: &str = r#"[
    {"last_updated": 1700000000, "legal": "API terms"},
    {"position": "Python Backend Engineer", "company": "Acme", "location": "", "url": "https://remoteok.com/1", "tags": ["python", "backend"]},
    {"position": "Go Engineer", "company": "Gopher", "tags": ["go"]},
    {"position": "Data Engineer", "company": "Snake", "tags": ["python"], "description": "pandas"}
]"#;

const HIMALAYAS_BODY: &str = r#"{"jobs": [
    {"title": "Django Developer", "excerpt": "Python web work", "companyName": "Globex", "applicationLink": "https://himalayas.app/a", "locationRestrictions": ["Canada"]},
    {"title": "Designer", "excerpt": "Figma", "categories": ["Design"]}
]}"#;

struct Upstreams {
    remoteok: mockito::ServerGuard,
    himalayas: mockito::ServerGuard,
    // Mocks are removed when dropped
    _mocks: Vec<mockito::Mock>,
}

impl Upstreams {
    async fn start(remoteok_status: usize) -> Self {
        let mut remoteok = mockito::Server::new_async().await;
        let remoteok_mock = remoteok
            .mock("GET", "/api")
            .with_status(remoteok_status)
            .with_header("content-type", "application/json")
            .with_body(REMOTEOK_BODY)
            .create_async()
            .await;

        let mut himalayas = mockito::Server::new_async().await;
        let himalayas_mock = himalayas
            .mock("GET", "/jobs/api")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(HIMALAYAS_BODY)
            .create_async()
            .await;

        Self {
            remoteok,
            himalayas,
            _mocks: vec![remoteok_mock, himalayas_mock],
        }
    }

    fn config(&self) -> ScraperConfig {
        ScraperConfig {
            remoteok_url: format!("{}/api", self.remoteok.url()),
            himalayas_url: format!("{}/jobs/api", self.himalayas.url()),
            source_delay: Duration::ZERO,
            timeout: Duration::from_secs(5),
            ..ScraperConfig::default()
        }
    }
}

async fn test_router(scraper: ScraperConfig) -> Router {
    let store = JobStore::in_memory().await.expect("in-memory store");
    router(AppState { store, scraper })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(payload) => {
            builder = builder.header("content-type", "application/json");
            Body::from(payload.to_string())
        }
        None => Body::empty(),
    };
    let req = builder.body(body).expect("build request");

    let resp = app.clone().oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test(flavor = "multi_thread")]
async fn root_lists_endpoints() {
    let app = test_router(ScraperConfig::default()).await;

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Job Aggregator API");
    assert!(body["endpoints"].get("/scrape").is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn scrape_returns_and_stores_jobs_in_source_order() {
    let upstreams = Upstreams::start(200).await;
    let app = test_router(upstreams.config()).await;

    let (status, body) = send(
        &app,
        "POST",
        "/scrape",
        Some(json!({ "keyword": "python", "limit_per_source": 10 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Scraped 3 jobs for keyword 'python'");

    let jobs = body["jobs"].as_array().expect("jobs array");
    let sources: Vec<_> = jobs.iter().map(|j| j["source"].as_str().unwrap()).collect();
    assert_eq!(sources, vec!["RemoteOK", "RemoteOK", "Himalayas"]);
    assert_eq!(jobs[0]["location"], "Remote");
    assert_eq!(jobs[2]["location"], "Canada");

    let (status, stored) = send(&app, "GET", "/jobs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["count"], 3);
    // Newest first
    assert_eq!(stored["jobs"][0]["title"], "Django Developer");
    assert_eq!(stored["jobs"][0]["keyword"], "python");
}

#[tokio::test(flavor = "multi_thread")]
async fn scrape_limit_one_per_source_gives_two() {
    let upstreams = Upstreams::start(200).await;
    let app = test_router(upstreams.config()).await;

    let (status, body) = send(
        &app,
        "POST",
        "/scrape",
        Some(json!({ "keyword": "python", "limit_per_source": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jobs"].as_array().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn scrape_survives_one_source_failing() {
    let upstreams = Upstreams::start(500).await;
    let app = test_router(upstreams.config()).await;

    let (status, body) = send(&app, "POST", "/scrape", Some(json!({ "keyword": "python" }))).await;

    assert_eq!(status, StatusCode::OK);
    let jobs = body["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["source"], "Himalayas");
}

#[tokio::test(flavor = "multi_thread")]
async fn scrape_rejects_blank_keyword() {
    let app = test_router(ScraperConfig::default()).await;

    let (status, body) = send(&app, "POST", "/scrape", Some(json!({ "keyword": "  " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "keyword must not be empty");
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_scrapes_store_duplicates() {
    let upstreams = Upstreams::start(200).await;
    let app = test_router(upstreams.config()).await;
    let request = json!({ "keyword": "python", "limit_per_source": 1 });

    send(&app, "POST", "/scrape", Some(request.clone())).await;
    send(&app, "POST", "/scrape", Some(request)).await;

    let (_, stored) = send(&app, "GET", "/jobs?limit=100", None).await;
    assert_eq!(stored["count"], 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn search_source_filter_and_clear() {
    let upstreams = Upstreams::start(200).await;
    let app = test_router(upstreams.config()).await;
    send(&app, "POST", "/scrape", Some(json!({ "keyword": "python" }))).await;

    let (status, found) = send(&app, "GET", "/jobs/search?keyword=globex", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["count"], 1);

    let (_, by_source) = send(&app, "GET", "/jobs/source/RemoteOK", None).await;
    assert_eq!(by_source["count"], 2);

    let (_, capped) = send(&app, "GET", "/jobs?limit=1", None).await;
    assert_eq!(capped["count"], 1);

    let (status, cleared) = send(&app, "DELETE", "/jobs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["message"], "All jobs cleared");

    let (_, empty) = send(&app, "GET", "/jobs", None).await;
    assert_eq!(empty["count"], 0);
}
