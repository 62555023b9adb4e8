//! Unified error codes for the store backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product / cart errors
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

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no line items
    OrderEmpty = 4007,
    /// Gross amount does not match the sum of line items
    AmountMismatch = 4008,
    /// Illegal order state transition
    InvalidTransition = 4101,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Payment gateway call failed
    GatewayError = 5101,
    /// Payment gateway call timed out
    GatewayTimeout = 5102,

    // ==================== 6xxx: Product / Cart ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Not enough stock to fulfil the order
    InsufficientStock = 6003,
    /// Cart not found
    CartNotFound = 6701,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
}

impl ErrorCode {
    /// Default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::NotAuthenticated => "Please login first",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Limited access",
            Self::OrderNotFound => "Order not found",
            Self::OrderEmpty => "Order has no items",
            Self::AmountMismatch => "Gross amount does not match line items",
            Self::InvalidTransition => "Illegal order state transition",
            Self::PaymentFailed => "Payment processing failed",
            Self::GatewayError => "Payment gateway error",
            Self::GatewayTimeout => "Payment gateway timed out",
            Self::ProductNotFound => "Product not found",
            Self::InsufficientStock => "Insufficient stock",
            Self::CartNotFound => "Cart not found",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::NetworkError => "Network error",
        }
    }

    /// Numeric value of the code
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", *self as u16)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            1001 => Self::NotAuthenticated,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            2001 => Self::PermissionDenied,
            2003 => Self::AdminRequired,
            4001 => Self::OrderNotFound,
            4007 => Self::OrderEmpty,
            4008 => Self::AmountMismatch,
            4101 => Self::InvalidTransition,
            5001 => Self::PaymentFailed,
            5101 => Self::GatewayError,
            5102 => Self::GatewayTimeout,
            6001 => Self::ProductNotFound,
            6003 => Self::InsufficientStock,
            6701 => Self::CartNotFound,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::NetworkError,
            other => return Err(format!("unknown error code: {other}")),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_u16() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidTransition,
            ErrorCode::InsufficientStock,
            ErrorCode::GatewayTimeout,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::InvalidTransition.to_string(), "E4101");
        assert_eq!(ErrorCode::Success.to_string(), "E0000");
    }
}
