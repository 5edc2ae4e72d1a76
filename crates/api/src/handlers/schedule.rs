use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use clinicdesk_core::{
    errors::TimeError,
    form::ScheduleForm,
    models::schedule::{DoctorSchedule, DoctorScheduleResponse, ScheduleFilter, ScheduleRequest},
};
use clinicdesk_db::models::DbDoctorSchedule;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::CurrentUser, error_handling::AppError},
};

fn not_found(id: Uuid) -> TimeError {
    TimeError::NotFound(format!("Schedule with ID {} not found", id))
}

/// Validates a draft into a storable schedule. Nothing is written on failure.
fn validated(payload: ScheduleRequest) -> Result<DoctorSchedule, TimeError> {
    ScheduleForm::from(payload).submit().map_err(TimeError::from)
}

/// Rejects a second schedule for the same doctor and weekday.
///
/// Concurrent writers can both pass this check; the store then reports the
/// loser as a conflict too.
async fn ensure_day_is_free(
    state: &ApiState,
    schedule: &DoctorSchedule,
    except: Option<Uuid>,
) -> Result<(), AppError> {
    let existing = state
        .store
        .find_schedule_for_day(schedule.doctor_id(), schedule.day_of_week())
        .await?;

    match existing {
        Some(row) if Some(row.id) != except => Err(AppError(TimeError::Conflict(format!(
            "Doctor {} already has a {} schedule ({})",
            schedule.doctor_id(),
            schedule.day_of_week(),
            row.id
        )))),
        _ => Ok(()),
    }
}

async fn load(state: &ApiState, id: Uuid) -> Result<DbDoctorSchedule, AppError> {
    let row = state.store.get_schedule(id).await?.ok_or_else(|| not_found(id))?;
    Ok(row)
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    CurrentUser(ctx): CurrentUser,
    Json(payload): Json<ScheduleRequest>,
) -> Result<(StatusCode, Json<DoctorScheduleResponse>), AppError> {
    let schedule = validated(payload)?;
    ctx.ensure_can_manage_schedules_of(schedule.doctor_id())?;
    ensure_day_is_free(&state, &schedule, None).await?;

    let row = state.store.create_schedule(schedule).await?;
    info!(
        "Created schedule {} for doctor {} on {}",
        row.id, row.doctor_id, row.day_of_week
    );

    Ok((StatusCode::CREATED, Json(row.into_response()?)))
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
    CurrentUser(ctx): CurrentUser,
    Query(mut filter): Query<ScheduleFilter>,
) -> Result<Json<Vec<DoctorScheduleResponse>>, AppError> {
    if let Some(own_id) = ctx.scoped_doctor_id() {
        if let Some(doctor_id) = filter.doctor_id {
            ctx.ensure_can_view_schedules_of(doctor_id)?;
        }
        filter.doctor_id = Some(own_id);
    }

    let rows = state.store.list_schedules(filter).await?;
    let mut schedules = rows
        .into_iter()
        .map(DbDoctorSchedule::into_response)
        .collect::<eyre::Result<Vec<_>>>()?;
    schedules.sort_by_key(|s| (s.doctor_id, s.day_of_week));

    Ok(Json(schedules))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DoctorScheduleResponse>, AppError> {
    let row = load(&state, id).await?;
    ctx.ensure_can_view_schedules_of(row.doctor_id)?;

    Ok(Json(row.into_response()?))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ScheduleRequest>,
) -> Result<Json<DoctorScheduleResponse>, AppError> {
    let schedule = validated(payload)?;

    let existing = load(&state, id).await?;
    ctx.ensure_can_manage_schedules_of(existing.doctor_id)?;
    ctx.ensure_can_manage_schedules_of(schedule.doctor_id())?;
    ensure_day_is_free(&state, &schedule, Some(id)).await?;

    let row = state
        .store
        .update_schedule(id, schedule)
        .await?
        .ok_or_else(|| not_found(id))?;
    info!("Updated schedule {}", id);

    Ok(Json(row.into_response()?))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let existing = load(&state, id).await?;
    ctx.ensure_can_manage_schedules_of(existing.doctor_id)?;

    if !state.store.delete_schedule(id).await? {
        return Err(AppError(not_found(id)));
    }
    info!("Deleted schedule {}", id);

    Ok(StatusCode::NO_CONTENT)
}
