//! User and address models (collaborator-owned)
//!
//! Identity and shipping addresses are written by the auth/profile services;
//! this backend only reads them when projecting orders.

use serde::{Deserialize, Serialize};

/// User row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Access level: `admin` or `user`
    pub level: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.level == "admin"
    }
}

/// Shipping address row (one per user in the current model)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub province: String,
    pub city: String,
    pub district: String,
    pub village: String,
    pub detail: String,
    /// Shipping cost to this address, minor units
    pub shipping: i64,
}
