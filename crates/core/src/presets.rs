//! Shift presets and the slot composer used by schedule forms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TimeError;
use crate::models::schedule::ShiftPresetResponse;
use crate::models::time_slot::TimeSlotDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftPreset {
    Morning,
    Afternoon,
    Evening,
    /// Crosses midnight, so a slot built from it fails the range check.
    Night,
}

impl ShiftPreset {
    pub const ALL: [ShiftPreset; 4] = [
        ShiftPreset::Morning,
        ShiftPreset::Afternoon,
        ShiftPreset::Evening,
        ShiftPreset::Night,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ShiftPreset::Morning => "morning",
            ShiftPreset::Afternoon => "afternoon",
            ShiftPreset::Evening => "evening",
            ShiftPreset::Night => "night",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShiftPreset::Morning => "Morning Shift",
            ShiftPreset::Afternoon => "Afternoon Shift",
            ShiftPreset::Evening => "Evening Shift",
            ShiftPreset::Night => "Night Shift",
        }
    }

    pub fn start_time(&self) -> &'static str {
        match self {
            ShiftPreset::Morning => "08:00",
            ShiftPreset::Afternoon => "13:00",
            ShiftPreset::Evening => "17:00",
            ShiftPreset::Night => "22:00",
        }
    }

    pub fn end_time(&self) -> &'static str {
        match self {
            ShiftPreset::Morning => "12:00",
            ShiftPreset::Afternoon => "17:00",
            ShiftPreset::Evening => "21:00",
            ShiftPreset::Night => "06:00",
        }
    }

    pub fn to_draft(&self) -> TimeSlotDraft {
        TimeSlotDraft::new(self.start_time(), self.end_time())
    }
}

impl fmt::Display for ShiftPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.label(), self.start_time(), self.end_time())
    }
}

impl FromStr for ShiftPreset {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShiftPreset::ALL
            .into_iter()
            .find(|preset| preset.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TimeError::Validation(format!("Unknown shift preset: {}", s)))
    }
}

impl From<ShiftPreset> for ShiftPresetResponse {
    fn from(preset: ShiftPreset) -> Self {
        ShiftPresetResponse {
            key: preset.key().to_string(),
            label: preset.label().to_string(),
            start_time: preset.start_time().to_string(),
            end_time: preset.end_time().to_string(),
        }
    }
}

/// Appends an empty row for manual entry.
pub fn add_blank(slots: &mut Vec<TimeSlotDraft>) {
    slots.push(TimeSlotDraft::blank());
}

/// Appends a row prefilled from `preset`. Duplicates are left to validation.
pub fn add_from_preset(slots: &mut Vec<TimeSlotDraft>, preset: ShiftPreset) {
    slots.push(preset.to_draft());
}
