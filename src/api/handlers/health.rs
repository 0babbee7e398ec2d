//! Health check endpoint.

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}

/// GET /ping - liveness probe. The body is part of the wire contract.
async fn ping() -> &'static str {
    "pong"
}
