//! Router configuration for the API.

use axum::{Router, middleware};

use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// Middleware is applied in reverse order of declaration (last added runs
/// first), so the request ID is set before the logging layer reads it.
pub fn create_router(state: AppState) -> Router {
    let job_routes = Router::new()
        .nest("/schedule", handlers::schedule::schedule_routes())
        .nest("/execute", handlers::execution::execution_routes())
        .nest("/logs", handlers::logs::logs_routes());

    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/jobs", job_routes)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
