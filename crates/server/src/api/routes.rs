use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Crawl any canonical URL
        .route("/scrapp", get(handlers::scrapp))
        // Crawl by artist
        .route("/{artist}", get(handlers::discography))
        .route("/{artist}/{album}", get(handlers::album))
        .route("/{artist}/track/{track}", get(handlers::track))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
}
