//! Product model (inventory ledger)

use serde::{Deserialize, Serialize};

/// Product row — authoritative stock, price and capital cost
///
/// `profit = price - capital` is maintained on every write. `stock` must never
/// go negative; the schema enforces it with a CHECK constraint and the confirm
/// transition guards the decrement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    /// Unit sale price, minor units
    pub price: i64,
    /// Unit acquisition cost ("capital"), minor units
    pub capital: i64,
    /// Derived: price - capital
    pub profit: i64,
    pub stock: i64,
    /// Shipping weight in grams
    pub weight: Option<i64>,
}

/// Create / upsert payload
///
/// When `id` is present the product is updated in place (the original admin UI
/// reuses one form for both); otherwise a new row is inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub id: Option<i64>,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub capital: i64,
    pub stock: i64,
    pub weight: Option<i64>,
}
