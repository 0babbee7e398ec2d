//! Live log relay handler.

use axum::{
    Router,
    body::Body,
    extract::{Query, State, rejection::QueryRejection},
    http::header,
    response::Response,
    routing::get,
};

use crate::api::dto::LogsQuery;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn logs_routes() -> Router<AppState> {
    Router::new().route("/", get(stream_logs))
}

/// GET /jobs/logs?name=... - Relay live execution logs
///
/// The body is built straight from the upstream byte stream, so bytes flow
/// to the client as the cluster produces them. When the client disconnects
/// the body is dropped, which drops the upstream stream.
async fn stream_logs(
    State(state): State<AppState>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query.map_err(|_| AppError::MalformedRequest)?;
    let stream = state.services.logs.stream(&query.name).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })
}
