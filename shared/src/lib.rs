//! Shared types for the store backend
//!
//! Common types used by the server and by integration tooling: domain models,
//! the order state machine, error types and the API response envelope.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use order::{FulfillmentEvent, FulfillmentStatus, PaymentStatus};
