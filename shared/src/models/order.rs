//! Order models
//!
//! Row types, the create payload, the gateway webhook payload and the
//! role-aware projection views.

use crate::order::{FulfillmentStatus, PaymentStatus};
use serde::{Deserialize, Serialize};

// =============================================================================
// Rows
// =============================================================================

/// Order header row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Externally visible transaction reference (`ORDER-XXXXX-XXXXX`),
    /// echoed back by the payment gateway in webhook notifications
    pub transaction_id: String,
    pub user_id: i64,
    /// Total charged amount, minor units; equals Σ(item price·qty + shipping)
    pub gross_amount: i64,
    pub payment_status: PaymentStatus,
    pub fulfillment_status: FulfillmentStatus,
    /// Carrier tracking code, set on the ship transition
    pub resi: Option<String>,
    pub created_at: i64,
}

/// Order line item row — price and shipping are snapshots taken at purchase
/// time; later product price changes never touch them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price snapshot, minor units
    pub price: i64,
    /// Per-line shipping cost snapshot, minor units
    pub shipping: i64,
}

// =============================================================================
// Request payloads
// =============================================================================

/// One line of a create-order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    /// Product ID
    pub id: i64,
    pub quantity: i64,
    /// Unit price, minor units (validated against gross_amount)
    pub price: i64,
    /// Per-line shipping cost, minor units
    #[serde(default)]
    pub shipping: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub products: Vec<OrderItemInput>,
    /// Client-computed total; must equal Σ(price·qty + shipping)
    pub gross_amount: i64,
}

/// Gateway webhook payload (provider vocabulary, mapped internally)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Matches `Order::transaction_id`
    pub order_id: String,
    pub transaction_status: String,
    #[serde(default)]
    pub fraud_status: Option<String>,
}

// =============================================================================
// Projection views (role-aware)
// =============================================================================

/// User identity attached to an order view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUserView {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Shipping address attached to an order view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAddressView {
    pub province: String,
    pub city: String,
    pub district: String,
    pub village: String,
    pub detail: String,
    pub shipping: i64,
}

/// One projected line item
///
/// `capital` and `profit` are computed by the join but are authorization
/// sensitive: [`OrderView::redact_costs`] nulls them before a non-admin
/// response leaves the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineView {
    /// Product ID
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: i64,
    pub shipping: i64,
    /// quantity × product.capital (admin only)
    pub capital: Option<i64>,
    /// price − quantity × product.capital (admin only)
    pub profit: Option<i64>,
}

/// Denormalized order view: header + user + address + line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub id: i64,
    pub transaction_id: String,
    pub payment_status: PaymentStatus,
    pub fulfillment_status: FulfillmentStatus,
    pub resi: Option<String>,
    pub user: OrderUserView,
    pub product: Vec<OrderLineView>,
    pub gross_amount: i64,
    pub address: OrderAddressView,
    pub created_at: i64,
}

impl OrderView {
    /// Strip cost/profit figures for non-administrative callers
    pub fn redact_costs(&mut self) {
        for line in &mut self.product {
            line.capital = None;
            line.profit = None;
        }
    }
}
