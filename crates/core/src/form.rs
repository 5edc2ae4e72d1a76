//! Schedule form state driven by explicit commands.
//!
//! Each user action maps to one [`ScheduleCommand`]; [`ScheduleForm::apply`]
//! reduces it into the next state and [`ScheduleForm::submit`] turns the form
//! into a validated [`DoctorSchedule`] or the full set of errors.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{TimeError, TimeResult};
use crate::models::schedule::{DayOfWeek, DoctorSchedule, ScheduleRequest};
use crate::models::time_slot::TimeSlotDraft;
use crate::presets::{self, ShiftPreset};
use crate::validation::{FormField, ValidationErrors, check_time_slots, validate_time_slots};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleCommand {
    SelectDoctor { doctor_id: Uuid },
    SelectDay { day_of_week: DayOfWeek },
    SetActive { is_active: bool },
    AddBlankSlot,
    AddPresetSlot { preset: ShiftPreset },
    SetStartTime { slot: usize, value: String },
    SetEndTime { slot: usize, value: String },
    RemoveSlot { slot: usize },
    ClearSlots,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleForm {
    pub doctor_id: Option<Uuid>,
    pub day_of_week: Option<DayOfWeek>,
    pub time_slots: Vec<TimeSlotDraft>,
    pub is_active: bool,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            doctor_id: None,
            day_of_week: None,
            time_slots: Vec::new(),
            is_active: true,
        }
    }
}

impl ScheduleForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a form for editing a stored schedule.
    pub fn edit(schedule: &DoctorSchedule) -> Self {
        Self {
            doctor_id: Some(schedule.doctor_id()),
            day_of_week: Some(schedule.day_of_week()),
            time_slots: schedule.time_slots().iter().copied().map(TimeSlotDraft::from).collect(),
            is_active: schedule.is_active(),
        }
    }

    fn slot_mut(&mut self, slot: usize) -> TimeResult<&mut TimeSlotDraft> {
        let len = self.time_slots.len();
        self.time_slots.get_mut(slot).ok_or_else(|| {
            warn!(slot, len, "Schedule command targets a missing slot");
            TimeError::Validation(format!("Time slot {} does not exist", slot + 1))
        })
    }

    /// Applies one command. Out-of-range slot indices leave the form untouched.
    pub fn apply(&mut self, command: ScheduleCommand) -> TimeResult<()> {
        debug!(?command, "Applying schedule command");

        match command {
            ScheduleCommand::SelectDoctor { doctor_id } => self.doctor_id = Some(doctor_id),
            ScheduleCommand::SelectDay { day_of_week } => self.day_of_week = Some(day_of_week),
            ScheduleCommand::SetActive { is_active } => self.is_active = is_active,
            ScheduleCommand::AddBlankSlot => presets::add_blank(&mut self.time_slots),
            ScheduleCommand::AddPresetSlot { preset } => {
                presets::add_from_preset(&mut self.time_slots, preset)
            }
            ScheduleCommand::SetStartTime { slot, value } => self.slot_mut(slot)?.start_time = value,
            ScheduleCommand::SetEndTime { slot, value } => self.slot_mut(slot)?.end_time = value,
            ScheduleCommand::RemoveSlot { slot } => {
                self.slot_mut(slot)?;
                self.time_slots.remove(slot);
            }
            ScheduleCommand::ClearSlots => self.time_slots.clear(),
        }

        Ok(())
    }

    /// Applies commands in order, stopping at the first that fails.
    pub fn apply_all(
        &mut self,
        commands: impl IntoIterator<Item = ScheduleCommand>,
    ) -> TimeResult<()> {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }

    /// Every current problem with the form, empty when it can be submitted.
    pub fn errors(&self) -> ValidationErrors {
        let mut errors = check_time_slots(&self.time_slots);
        errors.missing = self.missing_fields();
        errors
    }

    fn missing_fields(&self) -> Vec<FormField> {
        let mut missing = Vec::new();
        if self.doctor_id.is_none() {
            missing.push(FormField::Doctor);
        }
        if self.day_of_week.is_none() {
            missing.push(FormField::DayOfWeek);
        }
        missing
    }

    pub fn submit(&self) -> Result<DoctorSchedule, ValidationErrors> {
        let slots = validate_time_slots(&self.time_slots);

        match (self.doctor_id, self.day_of_week, slots) {
            (Some(doctor_id), Some(day_of_week), Ok(time_slots)) => Ok(
                DoctorSchedule::from_validated(doctor_id, day_of_week, time_slots, self.is_active),
            ),
            (_, _, slots) => {
                let mut errors = slots.err().unwrap_or_default();
                errors.missing = self.missing_fields();
                Err(errors)
            }
        }
    }
}

impl From<ScheduleRequest> for ScheduleForm {
    fn from(request: ScheduleRequest) -> Self {
        Self {
            doctor_id: request.doctor_id,
            day_of_week: request.day_of_week,
            time_slots: request.time_slots,
            is_active: request.is_active.unwrap_or(true),
        }
    }
}
