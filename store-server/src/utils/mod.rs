//! Utility Module

pub mod logger;
pub mod validation;

// Unified error and response types live in `shared`
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};
