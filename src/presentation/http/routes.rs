//! HTTP Routes
//!
//! Route definitions for the REST API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use super::handlers::{auth, file, health, user};
use crate::infrastructure::metrics::track_http_metrics;
use crate::presentation::middleware::resolve_caller;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Status & observability answer without touching sessions
        .route("/status", get(health::status))
        .route("/stats", get(health::stats))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/metrics", get(health::metrics))
        .merge(api_routes(state.clone()))
        .route_layer(middleware::from_fn(track_http_metrics))
        .fallback(|| async { AppError::NotFound })
        .with_state(state)
}

/// Routes that see the caller resolved from `X-Token`
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Users & sessions
        .route("/users", post(user::register))
        .route("/users/me", get(user::me))
        .route("/connect", get(auth::connect))
        .route("/disconnect", get(auth::disconnect))
        // Files
        .route("/files", post(file::upload).get(file::index))
        .route("/files/{id}", get(file::show))
        .route("/files/{id}/publish", put(file::publish))
        .route("/files/{id}/unpublish", put(file::unpublish))
        .route("/files/{id}/data", get(file::data))
        .route_layer(middleware::from_fn_with_state(state, resolve_caller))
}
