//! Unified error handling
//!
//! Error codes, the application error type, HTTP status mapping and the
//! `{ success, message, data }` response envelope shared by every endpoint.

mod codes;
mod http;
mod types;

pub use codes::ErrorCode;
pub use types::{ApiResponse, AppError, AppResult};
