use crate::app::AppState;
use axum::{extract::State, http::StatusCode, response::Html};
use std::sync::Arc;
use tracing::error;

/// Serve the front-end shell
pub async fn index(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    state.pages.render_index().map(Html).map_err(|e| {
        error!("Failed to render index page: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page")
    })
}
