use axum::http::{HeaderMap, HeaderValue, StatusCode};
use clinicdesk_api::middleware::{
    auth::{USER_ID_HEADER, USER_ROLE_HEADER, auth_context_from_headers},
    error_handling::{AppError, map_error},
};
use clinicdesk_core::{
    auth::Role,
    errors::TimeError,
    validation::{ListError, ValidationErrors},
};
use rstest::rstest;
use uuid::Uuid;

#[rstest]
#[case(TimeError::NotFound("Resource not found".to_string()), StatusCode::NOT_FOUND)]
#[case(TimeError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(TimeError::Conflict("Duplicate".to_string()), StatusCode::CONFLICT)]
#[case(TimeError::Authentication("No identity".to_string()), StatusCode::UNAUTHORIZED)]
#[case(TimeError::Authorization("Not authorized".to_string()), StatusCode::FORBIDDEN)]
#[case(TimeError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    TimeError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: TimeError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[test]
fn test_invalid_schedule_maps_to_unprocessable() {
    let error = TimeError::InvalidSchedule(ValidationErrors {
        list: Some(ListError::NoSlots),
        ..Default::default()
    });

    assert_eq!(AppError(error).status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_domain_error_inside_report_keeps_its_status() {
    let app_error: AppError = eyre::Report::new(TimeError::Conflict("taken".to_string())).into();

    assert!(matches!(app_error.0, TimeError::Conflict(_)));
    assert_eq!(app_error.status(), StatusCode::CONFLICT);
}

#[test]
fn test_eyre_report_becomes_database_error() {
    let app_error: AppError = eyre::eyre!("pool closed").into();

    assert!(matches!(app_error.0, TimeError::Database(_)));
    assert_eq!(app_error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

fn identity_headers(user_id: &str, role: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_ID_HEADER, HeaderValue::from_str(user_id).unwrap());
    headers.insert(USER_ROLE_HEADER, HeaderValue::from_str(role).unwrap());
    headers
}

#[test]
fn test_auth_context_from_headers() {
    let user_id = Uuid::new_v4();
    let ctx = auth_context_from_headers(&identity_headers(&user_id.to_string(), "doctor")).unwrap();

    assert_eq!(ctx.role, Role::Doctor);
    assert_eq!(ctx.current_user_id, user_id);
}

#[rstest]
#[case::bad_uuid("not-a-uuid", "admin")]
#[case::bad_role("6f1c2d8e-43b1-4b8a-9d55-0e5f1d7c2a10", "janitor")]
fn test_auth_context_rejects_malformed_headers(#[case] user_id: &str, #[case] role: &str) {
    let err = auth_context_from_headers(&identity_headers(user_id, role)).unwrap_err();

    assert!(matches!(err, TimeError::Authentication(_)));
}

#[test]
fn test_auth_context_requires_role() {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_ID_HEADER,
        HeaderValue::from_str(&Uuid::new_v4().to_string()).unwrap(),
    );

    let err = auth_context_from_headers(&headers).unwrap_err();
    assert!(err.to_string().contains(USER_ROLE_HEADER));
}
