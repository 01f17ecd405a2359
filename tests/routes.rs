use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use satellite_scraper::{
    api::routes::create_router,
    config::ScrapeConfig,
    error::{AppError, Result},
    runner::{ScrapeRunner, TableSource},
    AppState,
};

/// Replies with a canned result and counts calls.
struct MockSource {
    reply: std::result::Result<Value, String>,
    calls: AtomicUsize,
}

impl MockSource {
    fn ok(value: Value) -> Arc<Self> {
        Arc::new(Self { reply: Ok(value), calls: AtomicUsize::new(0) })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self { reply: Err(message.to_string()), calls: AtomicUsize::new(0) })
    }
}

#[async_trait]
impl TableSource for MockSource {
    async fn get_table(&self, _config: &ScrapeConfig) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(AppError::FetchError)
    }
}

fn app_with(source: Arc<MockSource>) -> Router {
    create_router(AppState::new(ScrapeRunner::new(ScrapeConfig::default(), source)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn root_returns_welcome_text() {
    let source = MockSource::ok(json!([]));
    let (status, body) = get(app_with(source.clone()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("Welcome to Satellite Scraper App"));
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn scrape_returns_mocked_rows() {
    let rows = json!([{"id": "mock1"}, {"id": "mock2"}]);
    let (status, body) = get(app_with(MockSource::ok(rows.clone())), "/scrape").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"success": true, "items": 2, "data": rows}));
}

#[tokio::test]
async fn scrape_non_array_has_null_items() {
    let value = json!({"status": "partial"});
    let (status, body) = get(app_with(MockSource::ok(value.clone())), "/scrape").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["items"], Value::Null);
    assert_eq!(body["data"], value);
}

#[tokio::test]
async fn scrape_failure_maps_to_500() {
    let (status, body) = get(app_with(MockSource::failing("connection reset")), "/scrape").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body,
        json!({"success": false, "error": "Failed to fetch data: connection reset"})
    );
}

#[tokio::test]
async fn each_scrape_request_calls_the_source() {
    let source = MockSource::ok(json!([1]));
    let app = app_with(source.clone());

    let (first, _) = get(app.clone(), "/scrape").await;
    let (second, _) = get(app, "/scrape").await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = get(app_with(MockSource::ok(json!([]))), "/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
