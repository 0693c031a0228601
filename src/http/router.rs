//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Stable comparison-panel endpoints
        .route("/players/search", post(handlers::search_players))
        .route(
            "/players/ff-opportunity",
            post(handlers::player_opportunity_history),
        )
        // Page data
        .route("/ticker", get(handlers::get_ticker))
        .route("/opportunities", get(handlers::list_opportunities))
        .route(
            "/opportunities/{player_key}",
            get(handlers::get_opportunity_player),
        )
        .route("/projections", get(handlers::list_projections))
        .route(
            "/projections/{player_key}",
            get(handlers::get_projection_player),
        )
        .route("/metrics", get(handlers::list_metrics));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo =
            Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
