use axum::http::StatusCode;
use clinicdesk_core::{
    auth::Role,
    models::schedule::{ShiftPresetResponse, ValidateScheduleResponse},
    validation::{FormField, OverlapError},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, as_user};

#[tokio::test]
async fn test_health_needs_no_identity() {
    let server = TestContext::new().server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_presets_require_identity() {
    let server = TestContext::new().server();

    let response = server.get("/api/schedule-presets").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("x-user-id"));
}

#[tokio::test]
async fn test_presets_listed_in_catalog_order() {
    let server = TestContext::new().server();

    let response = as_user(server.get("/api/schedule-presets"), Role::Staff, Uuid::new_v4()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let presets = response.json::<Vec<ShiftPresetResponse>>();
    let keys: Vec<&str> = presets.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["morning", "afternoon", "evening", "night"]);
    assert_eq!(presets[3].start_time, "22:00");
    assert_eq!(presets[3].end_time, "06:00");
}

#[tokio::test]
async fn test_validate_accepts_good_draft() {
    let server = TestContext::new().server();

    let response = as_user(
        server.post("/api/schedules/validate").json(&json!({
            "doctor_id": Uuid::new_v4(),
            "day_of_week": "monday",
            "time_slots": [
                { "start_time": "08:00", "end_time": "12:00" },
                { "start_time": "13:00", "end_time": "17:00" },
            ],
        })),
        Role::Doctor,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<ValidateScheduleResponse>();
    assert!(body.valid);
    assert!(body.errors.is_empty());
}

#[tokio::test]
async fn test_validate_reports_overlap_and_missing_day() {
    let server = TestContext::new().server();

    let response = as_user(
        server.post("/api/schedules/validate").json(&json!({
            "doctor_id": Uuid::new_v4(),
            "time_slots": [
                { "start_time": "08:00", "end_time": "12:00" },
                { "start_time": "13:00", "end_time": "17:00" },
                { "start_time": "16:00", "end_time": "18:00" },
            ],
        })),
        Role::Admin,
        Uuid::new_v4(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<ValidateScheduleResponse>();
    assert!(!body.valid);
    assert_eq!(body.errors.missing, vec![FormField::DayOfWeek]);
    assert_eq!(body.errors.overlap, Some(OverlapError { first: 1, second: 2 }));
}
