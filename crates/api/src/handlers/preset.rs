use axum::Json;
use clinicdesk_core::{
    form::ScheduleForm,
    models::schedule::{ScheduleRequest, ShiftPresetResponse, ValidateScheduleResponse},
    presets::ShiftPreset,
};

use crate::middleware::auth::CurrentUser;

/// Lists the shift presets a schedule form can compose slots from.
pub async fn list_presets(CurrentUser(_ctx): CurrentUser) -> Json<Vec<ShiftPresetResponse>> {
    Json(ShiftPreset::ALL.into_iter().map(ShiftPresetResponse::from).collect())
}

/// Runs the schedule validator on a draft without storing anything.
///
/// Always answers `200`; `valid` tells the form whether it may submit and
/// `errors` lists what to show inline.
pub async fn validate_schedule(
    CurrentUser(_ctx): CurrentUser,
    Json(payload): Json<ScheduleRequest>,
) -> Json<ValidateScheduleResponse> {
    let errors = ScheduleForm::from(payload).errors();

    Json(ValidateScheduleResponse {
        valid: errors.is_empty(),
        errors,
    })
}
