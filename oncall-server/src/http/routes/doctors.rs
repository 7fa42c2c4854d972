//! Doctor endpoints
//!
//! One path, dispatched on verb. Update and delete read the doctor id from
//! the JSON body; lookups read it from `?id=`.

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use serde::Serialize;

use super::{method_not_allowed, preflight};
use crate::db::repos::{Doctor, DoctorRepo};
use crate::http::envelope::{CreatedId, Envelope};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonPayload, QueryParams};
use crate::http::server::AppState;
use crate::models::{DoctorPatch, DoctorQueryParams, NewDoctor};

/// A single doctor for `?id=` lookups, otherwise the full list
#[derive(Serialize)]
#[serde(untagged)]
pub enum DoctorsData {
    One(Doctor),
    Many(Vec<Doctor>),
}

/// GET /doctors - list all doctors, or one with `?id=`
async fn get_doctors(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<DoctorQueryParams>,
) -> Result<Envelope<DoctorsData>, ApiError> {
    let repo = DoctorRepo::new(&state.pool);

    let data = match params.id()? {
        Some(id) => DoctorsData::One(repo.get(id).await?),
        None => DoctorsData::Many(repo.list().await?),
    };

    Ok(Envelope::ok(data))
}

/// POST /doctors - create a doctor
async fn create_doctor(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload,
) -> Result<Envelope<CreatedId>, ApiError> {
    let doctor = NewDoctor::from_payload(&payload)?;
    let id = DoctorRepo::new(&state.pool).create(doctor).await?;

    tracing::info!(doctor_id = id, "doctor created");
    Ok(Envelope::created(CreatedId { id }, "Doctor created successfully"))
}

/// PUT /doctors - update the supplied fields of one doctor
async fn update_doctor(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload,
) -> Result<Envelope<()>, ApiError> {
    let patch = DoctorPatch::from_payload(&payload)?;
    DoctorRepo::new(&state.pool).update(&patch).await?;

    tracing::info!(doctor_id = patch.id, fields = patch.changes().len(), "doctor updated");
    Ok(Envelope::message_only("Doctor updated successfully"))
}

/// DELETE /doctors - delete a doctor and, by cascade, their schedules
async fn delete_doctor(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload,
) -> Result<Envelope<()>, ApiError> {
    let id = payload.id("doctor")?;
    DoctorRepo::new(&state.pool).delete(id).await?;

    tracing::info!(doctor_id = id, "doctor deleted");
    Ok(Envelope::message_only("Doctor deleted successfully"))
}

/// Doctor routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/doctors",
        get(get_doctors)
            .post(create_doctor)
            .put(update_doctor)
            .delete(delete_doctor)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}
