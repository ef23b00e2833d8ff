//! Shift Selection Model
//!
//! An employee's stated slot preference for one calendar date, consulted by
//! admins when building the schedule. At most one row per
//! (employee, day, month, year); an all-false preference is represented by
//! the absence of a row.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::employee::EmployeeBrief;

/// Shift selection entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShiftSelection {
    pub id: i64,
    pub employee_id: i64,
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub morning: bool,
    pub evening: bool,
    pub night: bool,
}

/// Selection annotated with the owning employee (admin schedule views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionView {
    #[serde(flatten)]
    pub selection: ShiftSelection,
    pub employee: EmployeeBrief,
}

/// Upsert payload (SetSelection)
///
/// All three flags false means "no preference": any existing row is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SelectionUpsert {
    pub employee_id: i64,
    #[validate(range(min = 1, max = 31))]
    pub day: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    #[validate(range(min = 1, max = 9999))]
    pub year: i32,
    #[serde(default)]
    pub morning: bool,
    #[serde(default)]
    pub evening: bool,
    #[serde(default)]
    pub night: bool,
}

impl SelectionUpsert {
    pub fn is_empty(&self) -> bool {
        !self.morning && !self.evening && !self.night
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_preference() {
        let upsert = SelectionUpsert {
            employee_id: 3,
            day: 10,
            month: 2,
            year: 2025,
            morning: false,
            evening: false,
            night: false,
        };
        assert!(upsert.is_empty());

        let upsert = SelectionUpsert { night: true, ..upsert };
        assert!(!upsert.is_empty());
    }

    #[test]
    fn test_upsert_validation() {
        let upsert = SelectionUpsert {
            employee_id: 3,
            day: 0,
            month: 2,
            year: 2025,
            morning: true,
            evening: false,
            night: false,
        };
        assert!(upsert.validate().is_err());
    }

    #[test]
    fn test_view_flattens_selection() {
        let view = SelectionView {
            selection: ShiftSelection {
                id: 1,
                employee_id: 3,
                day: 10,
                month: 2,
                year: 2025,
                morning: true,
                evening: false,
                night: true,
            },
            employee: EmployeeBrief {
                id: 3,
                first_name: "Jane".into(),
                last_name: "Doe".into(),
            },
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["day"], 10);
        assert_eq!(json["employee"]["first_name"], "Jane");
    }
}
