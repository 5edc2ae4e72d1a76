use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::{TimeError, TimeResult};

/// Wire and display format for a time of day: zero-padded 24-hour `HH:MM`.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// A time slot row as typed into a schedule form. Either side may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotDraft {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl TimeSlotDraft {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }
}

/// A validated availability interval within a single day, `[start_time, end_time)`.
///
/// The end is always after the start, including when read back from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeSlotRecord")]
pub struct TimeSlot {
    #[serde(serialize_with = "hhmm::serialize")]
    start_time: NaiveTime,
    #[serde(serialize_with = "hhmm::serialize")]
    end_time: NaiveTime,
}

#[derive(Deserialize)]
struct TimeSlotRecord {
    #[serde(deserialize_with = "hhmm::deserialize")]
    start_time: NaiveTime,
    #[serde(deserialize_with = "hhmm::deserialize")]
    end_time: NaiveTime,
}

impl TryFrom<TimeSlotRecord> for TimeSlot {
    type Error = TimeError;

    fn try_from(record: TimeSlotRecord) -> TimeResult<Self> {
        TimeSlot::new(record.start_time, record.end_time)
    }
}

impl TimeSlot {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> TimeResult<Self> {
        if start_time >= end_time {
            return Err(TimeError::Validation(format!(
                "end time {} must be after start time {}",
                end_time.format(TIME_OF_DAY_FORMAT),
                start_time.format(TIME_OF_DAY_FORMAT)
            )));
        }
        Ok(Self {
            start_time,
            end_time,
        })
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// Half-open overlap test. Slots that only touch at a boundary do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        intervals_overlap(
            (self.start_time, self.end_time),
            (other.start_time, other.end_time),
        )
    }
}

impl From<TimeSlot> for TimeSlotDraft {
    fn from(slot: TimeSlot) -> Self {
        TimeSlotDraft {
            start_time: slot.start_time.format(TIME_OF_DAY_FORMAT).to_string(),
            end_time: slot.end_time.format(TIME_OF_DAY_FORMAT).to_string(),
        }
    }
}

/// Parses a strict `HH:MM` value: two digits, a colon, two digits.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !well_formed {
        return None;
    }
    NaiveTime::parse_from_str(value, TIME_OF_DAY_FORMAT).ok()
}

/// Returns true when `later` overlaps `earlier`.
///
/// `later` overlaps if its start falls in `[earlier.start, earlier.end)`, its end
/// falls in `(earlier.start, earlier.end]`, or it fully contains `earlier`.
pub(crate) fn intervals_overlap(
    earlier: (NaiveTime, NaiveTime),
    later: (NaiveTime, NaiveTime),
) -> bool {
    let (a_start, a_end) = earlier;
    let (b_start, b_end) = later;

    (b_start >= a_start && b_start < a_end)
        || (b_end > a_start && b_end <= a_end)
        || (b_start <= a_start && b_end >= a_end)
}

pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::{TIME_OF_DAY_FORMAT, parse_time_of_day};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_OF_DAY_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse_time_of_day(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid time of day `{value}`, expected HH:MM")))
    }
}
