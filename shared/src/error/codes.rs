//! Unified error codes for the rota backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Employee errors
//! - 4xxx: Shift errors
//! - 5xxx: Swap request errors
//! - 6xxx: Shift selection errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1002,
    /// Token is invalid
    TokenInvalid = 1003,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin capability required
    AdminRequired = 2002,

    // ==================== 3xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 3001,
    /// Employee username already exists
    EmployeeUsernameExists = 3002,
    /// Employee still holds shifts or open swap requests
    EmployeeHasShifts = 3003,

    // ==================== 4xxx: Shift ====================
    /// Shift not found
    ShiftNotFound = 4001,
    /// Slot on that date is already assigned
    SlotOccupied = 4002,

    // ==================== 5xxx: Swap request ====================
    /// Swap request not found
    SwapRequestNotFound = 5001,
    /// Requester already has the maximum number of open swap requests
    SwapQuotaExceeded = 5002,
    /// Swap request has already reached a terminal state
    SwapAlreadyCompleted = 5003,
    /// Admin decision requires prior approval by the requested employee
    UserApprovalRequired = 5004,
    /// Approval was recorded but the shift could not be reassigned
    ReassignmentFailed = 5005,

    // ==================== 6xxx: Shift selection ====================
    /// Shift selection not found
    SelectionNotFound = 6001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator capability is required",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeUsernameExists => "Employee username already exists",
            ErrorCode::EmployeeHasShifts => {
                "Employee still holds shifts or open swap requests"
            }

            // Shift
            ErrorCode::ShiftNotFound => "Shift not found",
            ErrorCode::SlotOccupied => "Slot on that date is already assigned",

            // Swap request
            ErrorCode::SwapRequestNotFound => "Swap request not found",
            ErrorCode::SwapQuotaExceeded => "Can not have more than 5 open swap requests",
            ErrorCode::SwapAlreadyCompleted => "Swap request has already been completed",
            ErrorCode::UserApprovalRequired => {
                "Requested employee must approve before an admin decision"
            }
            ErrorCode::ReassignmentFailed => "Shift reassignment after approval failed",

            // Shift selection
            ErrorCode::SelectionNotFound => "Shift selection not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::TokenExpired),
            1003 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            // Employee
            3001 => Ok(ErrorCode::EmployeeNotFound),
            3002 => Ok(ErrorCode::EmployeeUsernameExists),
            3003 => Ok(ErrorCode::EmployeeHasShifts),

            // Shift
            4001 => Ok(ErrorCode::ShiftNotFound),
            4002 => Ok(ErrorCode::SlotOccupied),

            // Swap request
            5001 => Ok(ErrorCode::SwapRequestNotFound),
            5002 => Ok(ErrorCode::SwapQuotaExceeded),
            5003 => Ok(ErrorCode::SwapAlreadyCompleted),
            5004 => Ok(ErrorCode::UserApprovalRequired),
            5005 => Ok(ErrorCode::ReassignmentFailed),

            // Shift selection
            6001 => Ok(ErrorCode::SelectionNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
