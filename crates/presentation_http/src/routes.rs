//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Recipe API (v1)
        .route("/v1/suggestions", post(handlers::suggestions::suggest))
        .route("/v1/images", post(handlers::images::generate_image))
        // Cooking tools (v1)
        .route("/v1/tools", get(handlers::tools::ranked_tools))
        .route("/v1/tools/usage", post(handlers::tools::record_usage))
        .with_state(state)
}
