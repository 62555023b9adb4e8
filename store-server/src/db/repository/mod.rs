//! Repository Module
//!
//! Data access as free async functions over `&SqlitePool`. Multi-row writes
//! (order + items, cart + items, confirm + stock decrement) run inside
//! explicit transactions; a failure on any statement rolls the whole unit
//! back.
//!
//! All functions return [`shared::AppResult`]; sqlx errors convert to
//! `ErrorCode::DatabaseError` via `From<sqlx::Error>`.

pub mod cart;
pub mod order;
pub mod product;
