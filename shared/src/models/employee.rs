//! Employee Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::shift::Shift;
use super::swap_request::SwapRequestView;

/// Employee role flag
///
/// Stored as TEXT; authorization decisions go through the auth layer's
/// capability check, not ad-hoc inspection of this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "text"))]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role: Role,
    pub date_joined: NaiveDate,
}

/// Display name used in schedule views: "First Last", falling back to the
/// username when both name fields are blank
pub fn display_name(first_name: &str, last_name: &str, username: &str) -> String {
    let full = format!("{first_name} {last_name}");
    let full = full.trim();
    if full.is_empty() {
        username.to_string()
    } else {
        full.to_string()
    }
}

impl Employee {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name, &self.username)
    }
}

/// Employee projection embedded in other payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeBrief {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 11))]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// Update employee payload (field-wise, COALESCE semantics)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, max = 150))]
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 11))]
    pub phone_number: Option<String>,
    pub role: Option<Role>,
}

/// Employee detail view with derived collections
///
/// Mirrors what schedule and swap screens need in one payload: the
/// employee's current-year shifts plus their swap requests partitioned by
/// perspective. `admin_requests` is only populated for admin callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDetail {
    #[serde(flatten)]
    pub employee: Employee,
    pub shifts: Vec<Shift>,
    /// Requests awaiting this employee's own answer
    pub pending_requests: Vec<SwapRequestView>,
    /// All requests this employee sent
    pub sent_requests: Vec<SwapRequestView>,
    /// Sent requests that reached a terminal state
    pub completed_requests: Vec<SwapRequestView>,
    /// Sent requests still in flight
    pub processing_requests: Vec<SwapRequestView>,
    /// Admin-actionable queue (empty for non-admin callers)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_requests: Vec<SwapRequestView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_default_and_serde() {
        assert_eq!(Role::default(), Role::User);
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());

        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
        let role: Role = serde_json::from_str("\"User\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_display_name() {
        let mut emp = Employee {
            id: 1,
            username: "jdoe".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            phone_number: None,
            role: Role::User,
            date_joined: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        };
        assert_eq!(emp.display_name(), "Jane Doe");

        emp.first_name.clear();
        emp.last_name.clear();
        assert_eq!(emp.display_name(), "jdoe");
    }

    #[test]
    fn test_create_payload_defaults() {
        let json = r#"{"username":"jdoe","email":"jane@example.com","phone_number":null}"#;
        let payload: EmployeeCreate = serde_json::from_str(json).unwrap();
        assert_eq!(payload.role, Role::User);
        assert!(payload.first_name.is_empty());
    }
}
