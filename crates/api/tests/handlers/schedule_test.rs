use axum::http::StatusCode;
use clinicdesk_core::{
    auth::Role,
    errors::TimeError,
    models::schedule::{DayOfWeek, DoctorScheduleResponse, ScheduleFilter},
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, as_user, row_from, slot, stored_row};

fn monday_request(doctor_id: Uuid) -> Value {
    json!({
        "doctor_id": doctor_id,
        "day_of_week": "monday",
        "time_slots": [
            { "start_time": "08:00", "end_time": "12:00" },
            { "start_time": "12:00", "end_time": "16:00" },
        ],
    })
}

#[tokio::test]
async fn test_create_schedule_success() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();
    let schedule_id = Uuid::new_v4();

    ctx.store
        .expect_find_schedule_for_day()
        .with(predicate::eq(doctor_id), predicate::eq(DayOfWeek::Monday))
        .times(1)
        .returning(|_, _| Ok(None));
    ctx.store
        .expect_create_schedule()
        .withf(move |schedule| {
            schedule.doctor_id() == doctor_id
                && schedule.time_slots() == [slot("08:00", "12:00"), slot("12:00", "16:00")]
                && schedule.is_active()
        })
        .times(1)
        .returning(move |schedule| Ok(row_from(schedule_id, &schedule)));

    let server = ctx.server();
    let response = as_user(
        server.post("/api/schedules").json(&monday_request(doctor_id)),
        Role::Staff,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<DoctorScheduleResponse>();
    assert_eq!(body.id, schedule_id);
    assert_eq!(body.day_of_week, DayOfWeek::Monday);
    assert_eq!(body.time_slots.len(), 2);
}

#[tokio::test]
async fn test_create_invalid_schedule_writes_nothing() {
    // No store expectations: any call would fail the test
    let server = TestContext::new().server();

    let response = as_user(
        server.post("/api/schedules").json(&json!({
            "doctor_id": Uuid::new_v4(),
            "day_of_week": "tuesday",
            "time_slots": [
                { "start_time": "08:00", "end_time": "12:00" },
                { "start_time": "10:00", "end_time": "14:00" },
            ],
        })),
        Role::Admin,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>();
    assert_eq!(body["details"]["overlap"], json!({ "first": 0, "second": 1 }));
    assert_eq!(body["error"], "Invalid schedule: time slots 1 and 2 overlap");
}

#[tokio::test]
async fn test_create_empty_schedule_rejected() {
    let server = TestContext::new().server();

    let response = as_user(
        server.post("/api/schedules").json(&json!({
            "doctor_id": Uuid::new_v4(),
            "day_of_week": "tuesday",
            "time_slots": [],
        })),
        Role::Admin,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["details"]["list"], "no_slots");
}

#[tokio::test]
async fn test_create_night_shift_rejected() {
    let server = TestContext::new().server();

    let response = as_user(
        server.post("/api/schedules").json(&json!({
            "doctor_id": Uuid::new_v4(),
            "day_of_week": "friday",
            "time_slots": [{ "start_time": "22:00", "end_time": "06:00" }],
        })),
        Role::Admin,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.json::<Value>()["details"]["fields"],
        json!([{ "slot": 0, "field": "range", "kind": "end_not_after_start" }])
    );
}

#[tokio::test]
async fn test_create_duplicate_day_conflicts() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();
    let existing_id = Uuid::new_v4();

    ctx.store
        .expect_find_schedule_for_day()
        .returning(move |doctor_id, day| Ok(Some(stored_row(existing_id, doctor_id, day))));
    ctx.store.expect_create_schedule().times(0);

    let server = ctx.server();
    let response = as_user(
        server.post("/api/schedules").json(&monday_request(doctor_id)),
        Role::Admin,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_losing_concurrent_insert_conflicts() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();

    // Both requests saw a free day; the store rejects the second insert.
    ctx.store
        .expect_find_schedule_for_day()
        .returning(|_, _| Ok(None));
    ctx.store
        .expect_create_schedule()
        .times(1)
        .returning(|_| {
            Err(eyre::Report::new(TimeError::Conflict(
                "Doctor already has a monday schedule".to_string(),
            )))
        });

    let server = ctx.server();
    let response = as_user(
        server.post("/api/schedules").json(&monday_request(doctor_id)),
        Role::Admin,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .starts_with("Conflict:"));
}

#[tokio::test]
async fn test_update_losing_concurrent_write_conflicts() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();
    let doctor_id = Uuid::new_v4();

    ctx.store
        .expect_get_schedule()
        .returning(move |id| Ok(Some(stored_row(id, doctor_id, DayOfWeek::Friday))));
    ctx.store
        .expect_find_schedule_for_day()
        .returning(|_, _| Ok(None));
    ctx.store
        .expect_update_schedule()
        .times(1)
        .returning(|_, _| {
            Err(eyre::Report::new(TimeError::Conflict(
                "Doctor already has a monday schedule".to_string(),
            )))
        });

    let server = ctx.server();
    let response = as_user(
        server
            .put(&format!("/api/schedules/{}", id))
            .json(&monday_request(doctor_id)),
        Role::Staff,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_doctor_cannot_create_for_colleague() {
    let server = TestContext::new().server();

    let response = as_user(
        server.post("/api/schedules").json(&monday_request(Uuid::new_v4())),
        Role::Doctor,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_doctor_creates_own_schedule() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();

    ctx.store
        .expect_find_schedule_for_day()
        .returning(|_, _| Ok(None));
    ctx.store
        .expect_create_schedule()
        .times(1)
        .returning(|schedule| Ok(row_from(Uuid::new_v4(), &schedule)));

    let server = ctx.server();
    let response = as_user(
        server.post("/api/schedules").json(&monday_request(doctor_id)),
        Role::Doctor,
        doctor_id,
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_sorted_by_doctor_then_day() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();

    ctx.store
        .expect_list_schedules()
        .with(predicate::eq(ScheduleFilter::default()))
        .returning(move |_| {
            Ok(vec![
                stored_row(Uuid::new_v4(), doctor_id, DayOfWeek::Friday),
                stored_row(Uuid::new_v4(), doctor_id, DayOfWeek::Monday),
                stored_row(Uuid::new_v4(), doctor_id, DayOfWeek::Wednesday),
            ])
        });

    let server = ctx.server();
    let response = as_user(server.get("/api/schedules"), Role::Staff, Uuid::new_v4()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let days: Vec<DayOfWeek> = response
        .json::<Vec<DoctorScheduleResponse>>()
        .into_iter()
        .map(|s| s.day_of_week)
        .collect();
    assert_eq!(
        days,
        vec![DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday]
    );
}

#[tokio::test]
async fn test_list_passes_query_filter() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();
    let expected = ScheduleFilter {
        doctor_id: Some(doctor_id),
        day_of_week: Some(DayOfWeek::Tuesday),
        active_only: true,
    };

    ctx.store
        .expect_list_schedules()
        .with(predicate::eq(expected))
        .times(1)
        .returning(|_| Ok(vec![]));

    let server = ctx.server();
    let response = as_user(
        server
            .get("/api/schedules")
            .add_query_param("doctor_id", doctor_id)
            .add_query_param("day_of_week", "tuesday")
            .add_query_param("active_only", "true"),
        Role::Admin,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_doctor_list_is_scoped_to_self() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();

    ctx.store
        .expect_list_schedules()
        .withf(move |filter| filter.doctor_id == Some(doctor_id))
        .times(1)
        .returning(|_| Ok(vec![]));

    let server = ctx.server();
    let response = as_user(server.get("/api/schedules"), Role::Doctor, doctor_id).await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_doctor_cannot_list_colleague() {
    let server = TestContext::new().server();

    let response = as_user(
        server
            .get("/api/schedules")
            .add_query_param("doctor_id", Uuid::new_v4()),
        Role::Doctor,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_schedule_not_found() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.store
        .expect_get_schedule()
        .with(predicate::eq(id))
        .returning(|_| Ok(None));

    let server = ctx.server();
    let response = as_user(
        server.get(&format!("/api/schedules/{}", id)),
        Role::Admin,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_get_schedule_database_failure() {
    let mut ctx = TestContext::new();

    ctx.store
        .expect_get_schedule()
        .returning(|_| Err(eyre::eyre!("connection reset")));

    let server = ctx.server();
    let response = as_user(
        server.get(&format!("/api/schedules/{}", Uuid::new_v4())),
        Role::Admin,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_update_schedule_keeps_own_day() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();
    let doctor_id = Uuid::new_v4();

    ctx.store
        .expect_get_schedule()
        .with(predicate::eq(id))
        .returning(move |id| Ok(Some(stored_row(id, doctor_id, DayOfWeek::Monday))));
    // The schedule being edited already owns Monday
    ctx.store
        .expect_find_schedule_for_day()
        .returning(move |doctor_id, day| Ok(Some(stored_row(id, doctor_id, day))));
    ctx.store
        .expect_update_schedule()
        .withf(move |update_id, schedule| *update_id == id && schedule.time_slots().len() == 2)
        .times(1)
        .returning(|id, schedule| Ok(Some(row_from(id, &schedule))));

    let server = ctx.server();
    let response = as_user(
        server
            .put(&format!("/api/schedules/{}", id))
            .json(&monday_request(doctor_id)),
        Role::Doctor,
        doctor_id,
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<DoctorScheduleResponse>().id, id);
}

#[tokio::test]
async fn test_update_cannot_take_colleague_schedule() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();
    let doctor_id = Uuid::new_v4();

    ctx.store
        .expect_get_schedule()
        .returning(|id| Ok(Some(stored_row(id, Uuid::new_v4(), DayOfWeek::Monday))));
    ctx.store.expect_update_schedule().times(0);

    let server = ctx.server();
    let response = as_user(
        server
            .put(&format!("/api/schedules/{}", id))
            .json(&monday_request(doctor_id)),
        Role::Doctor,
        doctor_id,
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_schedule() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.store
        .expect_get_schedule()
        .returning(|id| Ok(Some(stored_row(id, Uuid::new_v4(), DayOfWeek::Sunday))));
    ctx.store
        .expect_delete_schedule()
        .with(predicate::eq(id))
        .times(1)
        .returning(|_| Ok(true));

    let server = ctx.server();
    let response = as_user(
        server.delete(&format!("/api/schedules/{}", id)),
        Role::Staff,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}
