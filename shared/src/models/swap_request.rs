//! Swap Request Model
//!
//! A swap request is a two-party approval workflow: the requesting employee
//! offers to hand one of their shifts to a co-worker; the shift is only
//! reassigned once both the requested employee and an admin have approved.
//!
//! Lifecycle:
//!
//! ```text
//! Pending ──user approve──► UserApproved ──admin approve──► Approved (shift reassigned)
//!    │                           │
//!    └──user decline──► Rejected └──admin decline──► Rejected
//! ```
//!
//! Terminal states keep the row (`completed = true`) for auditability;
//! rejections are never deleted.

use serde::{Deserialize, Serialize};

use super::employee::EmployeeBrief;
use super::shift::Shift;
use crate::error::{AppError, AppResult, ErrorCode};

/// Maximum number of non-terminal requests one employee may have open
pub const MAX_OPEN_REQUESTS: i64 = 5;

/// Whether an employee's open-request count leaves no room for another
pub fn quota_reached(open_requests: i64) -> bool {
    open_requests >= MAX_OPEN_REQUESTS
}

/// Swap request entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SwapRequest {
    pub id: i64,
    pub requesting_employee_id: i64,
    /// Raw identifier, deliberately not an enforced relation: the employee
    /// may have been deleted since the request was created.
    pub requested_employee_id: Option<i64>,
    pub shift_id: i64,
    pub is_user_approved: bool,
    pub is_admin_approved: bool,
    pub completed: bool,
}

/// Workflow state derived from the three flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapState {
    /// Awaiting the requested employee's answer
    Pending,
    /// Requested employee approved, awaiting the admin decision
    UserApproved,
    /// Both parties approved; the shift has been reassigned
    Approved,
    /// Either party declined; the shift was never touched
    Rejected,
}

impl SwapState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapState::Approved | SwapState::Rejected)
    }
}

impl SwapRequest {
    pub fn state(&self) -> SwapState {
        match (self.completed, self.is_admin_approved, self.is_user_approved) {
            (false, _, false) => SwapState::Pending,
            (false, _, true) => SwapState::UserApproved,
            (true, true, _) => SwapState::Approved,
            (true, false, _) => SwapState::Rejected,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.completed
    }

    /// Whether a create call for `data` updates this row in place instead
    /// of inserting a new one: same requester, same shift, and nobody has
    /// answered yet.
    pub fn matches_upsert_key(&self, data: &SwapRequestCreate) -> bool {
        self.requesting_employee_id == data.requesting_employee_id
            && self.shift_id == data.shift_id
            && !self.completed
            && !self.is_user_approved
    }

    /// Apply the requested employee's decision.
    ///
    /// Decline terminates the workflow without touching the shift; approve
    /// advances it to await the admin decision.
    pub fn respond_as_user(&mut self, approve: bool) -> AppResult<()> {
        if self.completed {
            return Err(AppError::new(ErrorCode::SwapAlreadyCompleted));
        }
        if approve {
            self.is_user_approved = true;
        } else {
            self.is_user_approved = false;
            self.completed = true;
        }
        Ok(())
    }

    /// Apply the admin's decision.
    ///
    /// Only valid after the requested employee approved; either outcome is
    /// terminal. Approval does not reassign the shift by itself — that is
    /// the storage layer's job, in the same transaction.
    pub fn respond_as_admin(&mut self, approve: bool) -> AppResult<()> {
        if self.completed {
            return Err(AppError::new(ErrorCode::SwapAlreadyCompleted));
        }
        if !self.is_user_approved {
            return Err(AppError::new(ErrorCode::UserApprovalRequired));
        }
        self.is_admin_approved = approve;
        self.completed = true;
        Ok(())
    }
}

/// Create-or-update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequestCreate {
    pub requesting_employee_id: i64,
    pub requested_employee_id: i64,
    pub shift_id: i64,
}

/// User/admin decision payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapDecision {
    pub approve: bool,
}

/// Hydrated swap request for API responses
///
/// `requested_employee` resolves leniently: a dangling id becomes `null`
/// rather than an error in read-only views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequestView {
    pub id: i64,
    pub requesting_employee: EmployeeBrief,
    pub requested_employee: Option<EmployeeBrief>,
    pub shift: Shift,
    pub is_user_approved: bool,
    pub is_admin_approved: bool,
    pub completed: bool,
    pub state: SwapState,
}

/// An employee's swap requests partitioned by perspective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSwapRequests {
    /// Requests awaiting this employee's own answer
    pub pending: Vec<SwapRequestView>,
    /// All requests this employee sent
    pub sent: Vec<SwapRequestView>,
    /// Sent requests that reached a terminal state
    pub completed: Vec<SwapRequestView>,
    /// Sent requests still in flight
    pub processing: Vec<SwapRequestView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_request() -> SwapRequest {
        SwapRequest {
            id: 1,
            requesting_employee_id: 3,
            requested_employee_id: Some(9),
            shift_id: 42,
            is_user_approved: false,
            is_admin_approved: false,
            completed: false,
        }
    }

    #[test]
    fn test_initial_state_is_pending() {
        assert_eq!(pending_request().state(), SwapState::Pending);
        assert!(!pending_request().is_terminal());
    }

    #[test]
    fn test_user_approve_advances() {
        let mut req = pending_request();
        req.respond_as_user(true).unwrap();
        assert_eq!(req.state(), SwapState::UserApproved);
        assert!(!req.completed);
    }

    #[test]
    fn test_user_decline_terminates() {
        let mut req = pending_request();
        req.respond_as_user(false).unwrap();
        assert!(req.completed);
        assert!(!req.is_user_approved);
        assert_eq!(req.state(), SwapState::Rejected);

        // no further transitions from a terminal state
        let err = req.respond_as_user(true).unwrap_err();
        assert_eq!(err.code, ErrorCode::SwapAlreadyCompleted);
        let err = req.respond_as_admin(true).unwrap_err();
        assert_eq!(err.code, ErrorCode::SwapAlreadyCompleted);
    }

    #[test]
    fn test_admin_requires_user_approval_first() {
        let mut req = pending_request();
        let err = req.respond_as_admin(true).unwrap_err();
        assert_eq!(err.code, ErrorCode::UserApprovalRequired);
        assert_eq!(req.state(), SwapState::Pending);
    }

    #[test]
    fn test_admin_approve_is_terminal() {
        let mut req = pending_request();
        req.respond_as_user(true).unwrap();
        req.respond_as_admin(true).unwrap();
        assert!(req.completed);
        assert!(req.is_admin_approved);
        assert_eq!(req.state(), SwapState::Approved);
    }

    #[test]
    fn test_admin_reject_after_user_approval() {
        // employee 3 asks employee 9 to take shift 42; 9 approves, admin rejects
        let mut req = pending_request();
        req.respond_as_user(true).unwrap();
        assert_eq!(req.state(), SwapState::UserApproved);

        req.respond_as_admin(false).unwrap();
        assert!(req.completed);
        assert!(!req.is_admin_approved);
        assert!(req.is_user_approved);
        assert_eq!(req.state(), SwapState::Rejected);
    }

    #[test]
    fn test_quota_allows_fifth_rejects_sixth() {
        // counts 0..=4 leave room, so the 5th creation goes through
        for open in 0..MAX_OPEN_REQUESTS {
            assert!(!quota_reached(open), "count {open} should leave room");
        }
        // at 5 open requests the 6th is refused
        assert!(quota_reached(MAX_OPEN_REQUESTS));
        assert!(quota_reached(MAX_OPEN_REQUESTS + 1));
    }

    #[test]
    fn test_upsert_key_matches_open_unanswered_request() {
        let create = SwapRequestCreate {
            requesting_employee_id: 3,
            requested_employee_id: 11,
            shift_id: 42,
        };

        // a pending request for the same shift is retargeted, not duplicated
        assert!(pending_request().matches_upsert_key(&create));

        let other_shift = SwapRequest {
            shift_id: 43,
            ..pending_request()
        };
        assert!(!other_shift.matches_upsert_key(&create));

        let other_requester = SwapRequest {
            requesting_employee_id: 4,
            ..pending_request()
        };
        assert!(!other_requester.matches_upsert_key(&create));

        // once the requested employee has answered, a new row is inserted
        let mut answered = pending_request();
        answered.respond_as_user(true).unwrap();
        assert!(!answered.matches_upsert_key(&create));

        let mut declined = pending_request();
        declined.respond_as_user(false).unwrap();
        assert!(!declined.matches_upsert_key(&create));
    }

    #[test]
    fn test_state_serde() {
        assert_eq!(
            serde_json::to_string(&SwapState::UserApproved).unwrap(),
            "\"user_approved\""
        );
        assert!(SwapState::Approved.is_terminal());
        assert!(!SwapState::Pending.is_terminal());
    }
}
