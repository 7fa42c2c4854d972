//! Schedule endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};

use super::{method_not_allowed, preflight};
use crate::db::repos::{ScheduleRepo, ScheduleWithDoctor};
use crate::http::envelope::{CreatedId, Envelope};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonPayload, QueryParams};
use crate::http::server::AppState;
use crate::models::{NewSchedule, ScheduleFilter, SchedulePatch, ScheduleQueryParams};

/// GET /schedules - list schedules, filtered by `?date=` and/or `?doctor_id=`
async fn list_schedules(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ScheduleQueryParams>,
) -> Result<Envelope<Vec<ScheduleWithDoctor>>, ApiError> {
    let filter = ScheduleFilter::try_from(params)?;
    let schedules = ScheduleRepo::new(&state.pool).list(filter).await?;
    Ok(Envelope::ok(schedules))
}

/// POST /schedules - assign a doctor to a date and put them on mandatory rest
async fn create_schedule(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload,
) -> Result<Envelope<CreatedId>, ApiError> {
    let schedule = NewSchedule::from_payload(&payload)?;
    let id = ScheduleRepo::new(&state.pool).create(schedule).await?;
    Ok(Envelope::created(CreatedId { id }, "Schedule created successfully"))
}

/// PUT /schedules - update the supplied fields of one schedule
async fn update_schedule(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload,
) -> Result<Envelope<()>, ApiError> {
    let patch = SchedulePatch::from_payload(&payload)?;
    ScheduleRepo::new(&state.pool).update(&patch).await?;

    tracing::info!(schedule_id = patch.id, "schedule updated");
    Ok(Envelope::message_only("Schedule updated successfully"))
}

/// DELETE /schedules
async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload,
) -> Result<Envelope<()>, ApiError> {
    let id = payload.id("schedule")?;
    ScheduleRepo::new(&state.pool).delete(id).await?;

    tracing::info!(schedule_id = id, "schedule deleted");
    Ok(Envelope::message_only("Schedule deleted successfully"))
}

/// Schedule routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/schedules",
        get(list_schedules)
            .post(create_schedule)
            .put(update_schedule)
            .delete(delete_schedule)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}
