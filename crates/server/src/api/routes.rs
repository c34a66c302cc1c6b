use axum::{
    middleware,
    routing::{get, get_service},
    Router,
};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::{blast, handlers, middleware::metrics_middleware};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config().static_files.dir.clone();
    let index_path = static_dir.join("index.html");

    // API routes
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config));

    // Static pages (index.html, results.html, favicon.ico, assets)
    let serve_dir = ServeDir::new(&static_dir).fallback(ServeFile::new(&index_path));

    Router::new()
        // GET serves the form, POST runs a BLAST search
        .route(
            "/",
            get_service(ServeFile::new(&index_path)).post(blast::submit_sequence),
        )
        .route("/metrics", get(handlers::metrics))
        .nest("/api/v1", api_routes)
        .fallback_service(serve_dir)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
