use crate::{config::Config, db::dbitems::DbItems, docs::ApiDoc, handlers::index, pages::PageRenderer, routes::create_api_routes};
use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::{AllowOrigin, Any, CorsLayer}, trace::TraceLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared state handed to every handler
#[derive(Debug)]
pub struct AppState {
    pub db: DbItems,
    pub pages: PageRenderer,
}

impl AppState {
    pub fn new(db: DbItems, pages: PageRenderer) -> Self {
        Self { db, pages }
    }
}

/// Assemble the page, API and documentation routes
pub fn build_app(state: Arc<AppState>, config: &Config) -> Router {
    Router::new()
        .route("/", get(index))
        // Mount API routes
        .nest("/api", create_api_routes())
        .with_state(state)
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config)),
        )
}

/// CORS policy: explicit origins when configured, permissive in development, closed otherwise
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins = config.cors_origin_list();
    if origins.is_empty() {
        if config.is_development() {
            info!("No CORS origins configured, allowing any origin in development");
            return CorsLayer::permissive();
        }
        return CorsLayer::new();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
