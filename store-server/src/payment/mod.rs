//! Payment Module
//!
//! Outbound gateway charge calls and inbound webhook notification handling.

pub mod gateway;
pub mod notification;

pub use gateway::{CustomerDetails, GatewayClient};
pub use notification::{CallbackOutcome, apply_notification, map_provider_status};
