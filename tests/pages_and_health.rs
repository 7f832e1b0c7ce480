//! Page shell, probes and API docs

mod common;

use axum::http::StatusCode;
use common::{get, setup_test_app, TEST_PAGE_TOKEN};

#[tokio::test]
async fn index_renders_shell_with_token() {
    let (app, _state) = setup_test_app().await;
    let res = get(&app, "/").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.content_type.clone().unwrap_or_default().starts_with("text/html"));
    assert!(res.text().contains(TEST_PAGE_TOKEN));
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _state) = setup_test_app().await;
    let res = get(&app, "/api/health").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["status"], "ok");
}

#[tokio::test]
async fn ready_reports_database_backend() {
    let (app, _state) = setup_test_app().await;
    let res = get(&app, "/api/ready").await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "sqlite");
}

#[tokio::test]
async fn ready_is_unavailable_when_store_is_closed() {
    let (app, state) = setup_test_app().await;
    state.db.close().await;
    let res = get(&app, "/api/ready").await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.json()["status"], "unavailable");
}

#[tokio::test]
async fn openapi_document_lists_item_paths() {
    let (app, _state) = setup_test_app().await;
    let res = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(res.status, StatusCode::OK);
    let doc = res.json();
    assert!(doc["paths"]["/api/add_item"]["post"].is_object());
    assert!(doc["paths"]["/api/items"]["get"].is_object());
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (app, _state) = setup_test_app().await;
    let res = get(&app, "/api/nope").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
