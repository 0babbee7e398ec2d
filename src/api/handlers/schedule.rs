//! Schedule CRUD handlers.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};

use crate::api::dto::{CreateScheduleRequest, ScheduleResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::submitter;

pub fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_schedule).get(list_schedules))
        .route("/{id}", get(get_schedule).delete(remove_schedule))
}

/// POST /jobs/schedule - Validate and persist a schedule
async fn create_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateScheduleRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ScheduleResponse>)> {
    let Json(body) = payload.map_err(|_| AppError::MalformedRequest)?;
    let request = body.into_schedule_request(submitter(&headers));
    let scheduled = state.services.scheduler.schedule(request).await?;
    Ok((StatusCode::CREATED, Json(scheduled.into())))
}

/// GET /jobs/schedule - List all enabled schedules
async fn list_schedules(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ScheduleResponse>>> {
    let schedules = state.services.scheduler.list().await?;
    Ok(Json(schedules.into_iter().map(Into::into).collect()))
}

/// GET /jobs/schedule/:id - Fetch one schedule
async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ScheduleResponse>> {
    let schedule = state.services.scheduler.get(&id).await?;
    Ok(Json(schedule.into()))
}

/// DELETE /jobs/schedule/:id - Disable a schedule
async fn remove_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.scheduler.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
