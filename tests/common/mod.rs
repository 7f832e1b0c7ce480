// Common test utilities for integration tests
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use items_backend::app::{build_app, AppState};
use items_backend::config::Config;
use items_backend::db::dbitems::DbItems;
use items_backend::pages::PageRenderer;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_PAGE_TOKEN: &str = "test-token";

/// Creates an in-memory store with the items table in place
pub async fn setup_test_db() -> DbItems {
    let db = DbItems::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    db.ensure_schema()
        .await
        .expect("Failed to create items table");
    db
}

/// Builds the full router over a fresh in-memory store
///
/// The returned state shares the store with the router, so tests can close
/// the pool or inspect rows directly.
pub async fn setup_test_app() -> (Router, Arc<AppState>) {
    setup_test_app_with_config(&Config::default()).await
}

/// Builds the full router with the given configuration
pub async fn setup_test_app_with_config(config: &Config) -> (Router, Arc<AppState>) {
    let db = setup_test_db().await;
    let pages = PageRenderer::new(TEST_PAGE_TOKEN).expect("Failed to load templates");
    let state = Arc::new(AppState::new(db, pages));
    let app = build_app(state.clone(), config);
    (app, state)
}

/// Configuration parsed from `(NAME, value)` pairs, as from the environment
pub fn config_from(pairs: &[(&str, &str)]) -> Config {
    Config::from_vars(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
        .expect("Failed to parse test configuration")
}

/// A response reduced to what the tests assert on
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not UTF-8")
    }

    pub fn header(&self, name: header::HeaderName) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed to respond");
    let status = response.status();
    let headers = response.headers().clone();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec();
    TestResponse { status, headers, content_type, body }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request");
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");
    send(app, request).await
}

pub async fn add_item(app: &Router, name: &str, description: &str) -> TestResponse {
    let body = serde_json::json!({ "name": name, "description": description }).to_string();
    post_json(app, "/api/add_item", &body).await
}
