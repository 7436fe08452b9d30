// Route table and middleware
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_stats, health_check};
use crate::presentation::push::{sse_handler, ws_handler};
use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    // Unknown paths fall through to the single-page app entry point
    let assets = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/stats", get(get_stats))
        .route("/api/events", get(sse_handler))
        .route("/ws", get(ws_handler))
        .fallback_service(assets)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
