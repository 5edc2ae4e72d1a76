use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TimeError;
use crate::models::time_slot::{TimeSlot, TimeSlotDraft};
use crate::validation::{ValidationErrors, validate_time_slots};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.as_str() == lowered)
            .ok_or_else(|| TimeError::Validation(format!("Unknown day of week: {}", s)))
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// A validated schedule for one doctor on one weekday.
///
/// Built by [`crate::form::ScheduleForm::submit`], so the slots are always
/// non-empty, well ordered and pairwise non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DoctorScheduleRecord")]
pub struct DoctorSchedule {
    doctor_id: Uuid,
    day_of_week: DayOfWeek,
    time_slots: Vec<TimeSlot>,
    is_active: bool,
}

impl DoctorSchedule {
    /// Callers must have run the slots through [`validate_time_slots`].
    pub(crate) fn from_validated(
        doctor_id: Uuid,
        day_of_week: DayOfWeek,
        time_slots: Vec<TimeSlot>,
        is_active: bool,
    ) -> Self {
        Self {
            doctor_id,
            day_of_week,
            time_slots,
            is_active,
        }
    }

    pub fn doctor_id(&self) -> Uuid {
        self.doctor_id
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        self.day_of_week
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

#[derive(Deserialize)]
struct DoctorScheduleRecord {
    doctor_id: Uuid,
    day_of_week: DayOfWeek,
    time_slots: Vec<TimeSlotDraft>,
    is_active: bool,
}

impl TryFrom<DoctorScheduleRecord> for DoctorSchedule {
    type Error = ValidationErrors;

    fn try_from(record: DoctorScheduleRecord) -> Result<Self, ValidationErrors> {
        let time_slots = validate_time_slots(&record.time_slots)?;
        Ok(Self::from_validated(
            record.doctor_id,
            record.day_of_week,
            time_slots,
            record.is_active,
        ))
    }
}

/// Draft payload for creating or replacing a schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub doctor_id: Option<Uuid>,
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlotDraft>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorScheduleResponse {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub day_of_week: DayOfWeek,
    pub time_slots: Vec<TimeSlot>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateScheduleResponse {
    pub valid: bool,
    pub errors: ValidationErrors,
}

/// Query parameters for listing schedules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleFilter {
    pub doctor_id: Option<Uuid>,
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftPresetResponse {
    pub key: String,
    pub label: String,
    pub start_time: String,
    pub end_time: String,
}
