//! Execution submission and status handlers.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};

use crate::api::dto::{ExecuteJobRequest, ExecuteJobResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::submitter;

pub fn execution_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(execute_job))
        .route("/{name}/status", get(execution_status))
}

/// POST /jobs/execute - Submit one execution of a job
async fn execute_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ExecuteJobRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ExecuteJobResponse>)> {
    let Json(body) = payload.map_err(|_| AppError::MalformedRequest)?;
    let request = body.into_execution_request(submitter(&headers));
    let receipt = state.services.executioner.execute(request).await?;
    Ok((StatusCode::CREATED, Json(receipt.into())))
}

/// GET /jobs/execute/:name/status - Current status of an execution
///
/// Always 200 with the canonical status string as a plain-text body; a
/// failed state query is itself one of the statuses.
async fn execution_status(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> String {
    state.services.executioner.status(&name).await.to_string()
}
