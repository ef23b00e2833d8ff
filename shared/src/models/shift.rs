//! Shift Model
//!
//! A shift is one of three daily slots (morning/evening/night) on a calendar
//! date, assigned to exactly one employee. At most one row exists per
//! (day, month, year, slot).

use serde::{Deserialize, Serialize};
use serde::{Deserializer, de};
use std::fmt;
use validator::Validate;

/// Daily slot kind, wire-encoded as 1/2/3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(into = "i16", try_from = "i16")]
#[repr(i16)]
pub enum Slot {
    Morning = 1,
    Evening = 2,
    Night = 3,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Morning, Slot::Evening, Slot::Night];

    /// Get the numeric slot value
    #[inline]
    pub const fn code(&self) -> i16 {
        *self as i16
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Slot::Morning => "morning",
            Slot::Evening => "evening",
            Slot::Night => "night",
        }
    }
}

impl From<Slot> for i16 {
    #[inline]
    fn from(slot: Slot) -> Self {
        slot.code()
    }
}

/// Error when converting from an invalid i16 to Slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSlot(pub i16);

impl fmt::Display for InvalidSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid slot: {}", self.0)
    }
}

impl std::error::Error for InvalidSlot {}

impl TryFrom<i16> for Slot {
    type Error = InvalidSlot;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Slot::Morning),
            2 => Ok(Slot::Evening),
            3 => Ok(Slot::Night),
            _ => Err(InvalidSlot(value)),
        }
    }
}

/// Shift entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shift {
    pub id: i64,
    pub employee_id: i64,
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub slot: Slot,
}

/// Shift annotated with the assignee's display name (schedule views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShiftWithEmployee {
    pub id: i64,
    pub employee_id: i64,
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub slot: Slot,
    pub employee_name: String,
}

/// Per-slot employee assignments for one date
///
/// Clients historically send `-1` for an empty slot; both `-1` and `null`
/// deserialize to `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SlotAssignments {
    #[serde(default, deserialize_with = "legacy_optional_id")]
    pub morning_employee_id: Option<i64>,
    #[serde(default, deserialize_with = "legacy_optional_id")]
    pub evening_employee_id: Option<i64>,
    #[serde(default, deserialize_with = "legacy_optional_id")]
    pub night_employee_id: Option<i64>,
}

impl SlotAssignments {
    /// (slot, employee) pairs for the non-empty slots, in slot order
    pub fn entries(&self) -> Vec<(Slot, i64)> {
        [
            (Slot::Morning, self.morning_employee_id),
            (Slot::Evening, self.evening_employee_id),
            (Slot::Night, self.night_employee_id),
        ]
        .into_iter()
        .filter_map(|(slot, id)| id.map(|id| (slot, id)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.morning_employee_id.is_none()
            && self.evening_employee_id.is_none()
            && self.night_employee_id.is_none()
    }
}

fn legacy_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    match value {
        Some(id) if id < -1 => Err(de::Error::custom(format!("invalid employee id: {id}"))),
        Some(-1) | None => Ok(None),
        Some(id) => Ok(Some(id)),
    }
}

/// Whole-day replacement payload (SetDayShifts)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DayAssignment {
    #[validate(range(min = 1, max = 31))]
    pub day: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    #[validate(range(min = 1, max = 9999))]
    pub year: i32,
    #[serde(flatten)]
    #[validate(nested)]
    pub slots: SlotAssignments,
}

/// One day's slots inside a month batch
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MonthDay {
    #[validate(range(min = 1, max = 31))]
    pub day: i32,
    #[serde(flatten)]
    #[validate(nested)]
    pub slots: SlotAssignments,
}

/// Month batch payload (BulkUpsertMonth): replaces the whole (month, year)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MonthAssignments {
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    #[validate(range(min = 1, max = 9999))]
    pub year: i32,
    #[validate(nested)]
    pub days: Vec<MonthDay>,
}

/// Month query parameters
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MonthQuery {
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    #[validate(range(min = 1, max = 9999))]
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_codes() {
        assert_eq!(Slot::Morning.code(), 1);
        assert_eq!(Slot::Evening.code(), 2);
        assert_eq!(Slot::Night.code(), 3);

        assert_eq!(Slot::try_from(1), Ok(Slot::Morning));
        assert_eq!(Slot::try_from(3), Ok(Slot::Night));
        assert_eq!(Slot::try_from(0), Err(InvalidSlot(0)));
        assert_eq!(Slot::try_from(4), Err(InvalidSlot(4)));
    }

    #[test]
    fn test_slot_serde_as_number() {
        assert_eq!(serde_json::to_string(&Slot::Evening).unwrap(), "2");
        let slot: Slot = serde_json::from_str("3").unwrap();
        assert_eq!(slot, Slot::Night);
        assert!(serde_json::from_str::<Slot>("5").is_err());
    }

    #[test]
    fn test_legacy_minus_one_means_empty() {
        let json = r#"{
            "day": 15, "month": 6, "year": 2024,
            "morning_employee_id": 7,
            "evening_employee_id": -1,
            "night_employee_id": 12
        }"#;
        let payload: DayAssignment = serde_json::from_str(json).unwrap();
        assert_eq!(payload.slots.morning_employee_id, Some(7));
        assert_eq!(payload.slots.evening_employee_id, None);
        assert_eq!(payload.slots.night_employee_id, Some(12));

        assert_eq!(
            payload.slots.entries(),
            vec![(Slot::Morning, 7), (Slot::Night, 12)]
        );
    }

    #[test]
    fn test_missing_slots_are_empty() {
        let json = r#"{"day": 1, "month": 1, "year": 2024}"#;
        let payload: DayAssignment = serde_json::from_str(json).unwrap();
        assert!(payload.slots.is_empty());
        assert!(payload.slots.entries().is_empty());
    }

    #[test]
    fn test_day_assignment_validation() {
        let ok = DayAssignment {
            day: 15,
            month: 6,
            year: 2024,
            slots: SlotAssignments::default(),
        };
        assert!(ok.validate().is_ok());

        let bad_day = DayAssignment { day: 32, ..ok.clone() };
        assert!(bad_day.validate().is_err());

        let bad_month = DayAssignment { month: 0, ..ok.clone() };
        assert!(bad_month.validate().is_err());

        let bad_year = DayAssignment { year: 10000, ..ok };
        assert!(bad_year.validate().is_err());
    }

    #[test]
    fn test_month_assignments_nested_validation() {
        let batch = MonthAssignments {
            month: 6,
            year: 2024,
            days: vec![MonthDay {
                day: 40,
                slots: SlotAssignments::default(),
            }],
        };
        assert!(batch.validate().is_err());
    }
}
