//! Time-slot validation for a single day's schedule.
//!
//! Slots are checked in three stages: the list must not be empty, each slot
//! must carry two well-formed times with the end after the start, and no two
//! slots may overlap. Overlap uses half-open `[start, end)` intervals, so
//! `08:00-12:00` followed by `12:00-16:00` is accepted.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::time_slot::{TimeSlot, TimeSlotDraft, intervals_overlap, parse_time_of_day};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListError {
    NoSlots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotField {
    Start,
    End,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Required,
    InvalidFormat,
    EndNotAfterStart,
}

/// A problem with one field of one slot. `slot` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub slot: usize,
    pub field: SlotField,
    pub kind: FieldErrorKind,
}

/// The first pair of overlapping slots found, `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapError {
    pub first: usize,
    pub second: usize,
}

/// A schedule-level field that is required but missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Doctor,
    DayOfWeek,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap: Option<OverlapError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
            && self.list.is_none()
            && self.fields.is_empty()
            && self.overlap.is_none()
    }

    /// Errors attached to the slot at `index`.
    pub fn for_slot(&self, index: usize) -> impl Iterator<Item = &FieldError> {
        self.fields.iter().filter(move |error| error.slot == index)
    }

    /// User-facing messages in display order.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        for field in &self.missing {
            messages.push(field.to_string());
        }
        if let Some(list) = &self.list {
            messages.push(list.to_string());
        }
        for error in &self.fields {
            messages.push(error.to_string());
        }
        if let Some(overlap) = &self.overlap {
            messages.push(overlap.to_string());
        }
        messages
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::NoSlots => f.write_str("at least one time slot is required"),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Doctor => f.write_str("a doctor must be selected"),
            FormField::DayOfWeek => f.write_str("a day of the week must be selected"),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot + 1;
        match (self.field, self.kind) {
            (SlotField::Start, FieldErrorKind::Required) => {
                write!(f, "slot {slot}: start time is required")
            }
            (SlotField::End, FieldErrorKind::Required) => {
                write!(f, "slot {slot}: end time is required")
            }
            (SlotField::Start, FieldErrorKind::InvalidFormat) => {
                write!(f, "slot {slot}: start time must be HH:MM")
            }
            (SlotField::End, FieldErrorKind::InvalidFormat) => {
                write!(f, "slot {slot}: end time must be HH:MM")
            }
            (_, FieldErrorKind::EndNotAfterStart) | (SlotField::Range, _) => {
                write!(f, "slot {slot}: end time must be after start time")
            }
        }
    }
}

impl fmt::Display for OverlapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "time slots {} and {} overlap",
            self.first + 1,
            self.second + 1
        )
    }
}

/// Reads one side of a draft slot, recording a field error when it is blank or malformed.
fn check_time(
    value: &str,
    slot: usize,
    field: SlotField,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError {
            slot,
            field,
            kind: FieldErrorKind::Required,
        });
        return None;
    }

    let parsed = parse_time_of_day(value);
    if parsed.is_none() {
        errors.push(FieldError {
            slot,
            field,
            kind: FieldErrorKind::InvalidFormat,
        });
    }
    parsed
}

/// Finds the first overlapping pair among slots that have both ends set.
fn find_overlap(bounds: &[Option<(NaiveTime, NaiveTime)>]) -> Option<OverlapError> {
    for (first, earlier) in bounds.iter().enumerate() {
        let Some(earlier) = earlier else { continue };
        for (offset, later) in bounds[first + 1..].iter().enumerate() {
            let Some(later) = later else { continue };
            if intervals_overlap(*earlier, *later) {
                return Some(OverlapError {
                    first,
                    second: first + 1 + offset,
                });
            }
        }
    }
    None
}

/// Collects every problem with `slots` without short-circuiting on field errors.
pub fn check_time_slots(slots: &[TimeSlotDraft]) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if slots.is_empty() {
        errors.list = Some(ListError::NoSlots);
        return errors;
    }

    let mut bounds = Vec::with_capacity(slots.len());
    for (index, slot) in slots.iter().enumerate() {
        let start = check_time(&slot.start_time, index, SlotField::Start, &mut errors.fields);
        let end = check_time(&slot.end_time, index, SlotField::End, &mut errors.fields);

        let pair = match (start, end) {
            (Some(start), Some(end)) => {
                if start >= end {
                    errors.fields.push(FieldError {
                        slot: index,
                        field: SlotField::Range,
                        kind: FieldErrorKind::EndNotAfterStart,
                    });
                }
                Some((start, end))
            }
            _ => None,
        };
        bounds.push(pair);
    }

    errors.overlap = find_overlap(&bounds);
    errors
}

/// Validates the slots of one schedule, returning them typed when acceptable.
pub fn validate_time_slots(slots: &[TimeSlotDraft]) -> Result<Vec<TimeSlot>, ValidationErrors> {
    let errors = check_time_slots(slots);
    if !errors.is_empty() {
        debug!(slot_count = slots.len(), %errors, "Rejected time slots");
        return Err(errors);
    }

    // Every draft parsed cleanly and is well ordered.
    Ok(slots
        .iter()
        .filter_map(|slot| {
            let start = parse_time_of_day(slot.start_time.trim())?;
            let end = parse_time_of_day(slot.end_time.trim())?;
            TimeSlot::new(start, end).ok()
        })
        .collect())
}
