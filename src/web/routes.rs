//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        // API routes
        .route("/search", get(handlers::search))
        .route("/summarize", post(handlers::summarize))
        .route("/health", get(handlers::health))
        .route("/stats", get(handlers::stats));

    // Frontend bundle
    if let Some(dir) = state.settings.server.static_dir.as_ref().filter(|d| d.is_dir()) {
        info!("Serving static files from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        // Add middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Add state
        .with_state(state)
}
