use chrono::{DateTime, Utc};
use clinicdesk_core::models::schedule::{DayOfWeek, DoctorScheduleResponse};
use clinicdesk_core::models::time_slot::TimeSlot;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctorSchedule {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub day_of_week: String,
    pub time_slots: Json<Vec<TimeSlot>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbDoctorSchedule {
    pub fn day_of_week(&self) -> Result<DayOfWeek> {
        self.day_of_week
            .parse()
            .map_err(|e| eyre!("Stored schedule {} has a bad day_of_week: {}", self.id, e))
    }

    pub fn into_response(self) -> Result<DoctorScheduleResponse> {
        let day_of_week = self.day_of_week()?;
        Ok(DoctorScheduleResponse {
            id: self.id,
            doctor_id: self.doctor_id,
            day_of_week,
            time_slots: self.time_slots.0,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
