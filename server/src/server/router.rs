use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use super::api;
use crate::config::AppConfig;

/// Create the axum router with all routes.
pub fn create_router(config: &AppConfig) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .merge(build_upload_routes(config.max_upload_bytes))
        // Any origin with credentials: mirrors the caller's origin and headers
        .layer(CorsLayer::very_permissive())
}

fn build_upload_routes(max_bytes: usize) -> Router {
    Router::new()
        .route("/upload", post(api::images::upload_image))
        .route("/crop", post(api::images::crop_image))
        .layer(DefaultBodyLimit::max(max_bytes))
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
