//! Cart models
//!
//! Ephemeral pre-order structure: same shape as an order but with no payment
//! semantics and no state machine. A cart and its items are created and
//! deleted as one atomic unit.

use serde::{Deserialize, Serialize};

/// Cart header row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Cart {
    pub id: i64,
    pub user_id: i64,
    pub created_at: i64,
}

/// Cart line item row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartItem {
    pub id: i64,
    pub cart_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price snapshot, minor units
    pub price: i64,
}

/// One line of a create-cart request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInput {
    /// Product ID
    pub id: i64,
    pub quantity: i64,
    pub price: i64,
}

/// Create cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartCreate {
    pub products: Vec<CartItemInput>,
}

/// Projected cart line with product name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineView {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: i64,
}

/// Denormalized cart view for the owning user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub cart_id: i64,
    pub user_name: String,
    pub email: String,
    pub phone: String,
    pub products: Vec<CartLineView>,
}
