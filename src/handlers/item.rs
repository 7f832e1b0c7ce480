use crate::{
    app::AppState,
    models::{CreateItemRequest, ErrorResponse, ItemsResponse},
    services::item_service::{self, ItemError},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::warn;

/// Create a new item
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, &'static str), (StatusCode, Json<ErrorResponse>)> {

    // Reject bodies that do not match the request schema
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected create item request: {}", rejection.body_text());
        rejection_to_error(rejection).into_response_parts()
    })?;

    item_service::add_item(&state.db, request)
        .await
        .map_err(ItemError::into_response_parts)?;

    Ok((StatusCode::CREATED, "Done"))
}

/// List all items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<ItemsResponse>), (StatusCode, Json<ErrorResponse>)> {
    let items = item_service::list_items(&state.db)
        .await
        .map_err(ItemError::into_response_parts)?;

    Ok((StatusCode::OK, Json(ItemsResponse { items })))
}

fn rejection_to_error(rejection: JsonRejection) -> ItemError {
    match rejection {
        JsonRejection::MissingJsonContentType(e) => ItemError::UnsupportedMediaType(e.body_text()),
        JsonRejection::BytesRejection(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            ItemError::PayloadTooLarge(e.body_text())
        }
        other => ItemError::MalformedRequest(other.body_text()),
    }
}
