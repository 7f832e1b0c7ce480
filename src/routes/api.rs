use crate::{app::AppState, handlers::{create_item, health_check, list_items, ready_check}};
use axum::{routing::{get, post}, Router};
use std::sync::Arc;

/// Create API routes
pub fn create_api_routes() -> Router<Arc<AppState>> {
    Router::<Arc<AppState>>::new()
        .route("/add_item", post(create_item))
        .route("/items", get(list_items))
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
}
