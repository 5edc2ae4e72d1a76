use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use chrono::Utc;
use clinicdesk_api::{
    ApiState, app,
    middleware::auth::{USER_ID_HEADER, USER_ROLE_HEADER},
};
use clinicdesk_core::{
    auth::Role,
    form::{ScheduleCommand, ScheduleForm},
    models::{
        schedule::{DayOfWeek, DoctorSchedule},
        time_slot::{TimeSlot, parse_time_of_day},
    },
    presets::ShiftPreset,
};
use clinicdesk_db::{mock::repositories::MockScheduleStore, models::DbDoctorSchedule};
use sqlx::types::Json;
use uuid::Uuid;

pub struct TestContext {
    pub store: MockScheduleStore,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            store: MockScheduleStore::new(),
        }
    }

    // Consumes the mock so its expectations are checked when the server drops
    pub fn server(self) -> TestServer {
        let state = Arc::new(ApiState::new(Arc::new(self.store)));
        TestServer::new(app(state)).expect("Failed to build test server")
    }
}

/// Adds identity headers for `role` acting as `user_id`.
pub fn as_user(request: TestRequest, role: Role, user_id: Uuid) -> TestRequest {
    request
        .add_header(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&user_id.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from_static(role.as_str()),
        )
}

pub fn slot(start: &str, end: &str) -> TimeSlot {
    let start = parse_time_of_day(start).expect("start should be HH:MM");
    let end = parse_time_of_day(end).expect("end should be HH:MM");
    TimeSlot::new(start, end).unwrap()
}

/// A stored row mirroring `schedule`.
pub fn row_from(id: Uuid, schedule: &DoctorSchedule) -> DbDoctorSchedule {
    let now = Utc::now();
    DbDoctorSchedule {
        id,
        doctor_id: schedule.doctor_id(),
        day_of_week: schedule.day_of_week().to_string(),
        time_slots: Json(schedule.time_slots().to_vec()),
        is_active: schedule.is_active(),
        created_at: now,
        updated_at: now,
    }
}

/// A stored morning-shift row.
pub fn stored_row(id: Uuid, doctor_id: Uuid, day_of_week: DayOfWeek) -> DbDoctorSchedule {
    let mut form = ScheduleForm::new();
    form.apply_all([
        ScheduleCommand::SelectDoctor { doctor_id },
        ScheduleCommand::SelectDay { day_of_week },
        ScheduleCommand::AddPresetSlot {
            preset: ShiftPreset::Morning,
        },
    ])
    .unwrap();
    row_from(id, &form.submit().unwrap())
}
