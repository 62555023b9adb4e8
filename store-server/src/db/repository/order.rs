//! Order repository
//!
//! 订单数据访问：创建（事务）、履约状态流转、支付回调落库、角色投影。
//!
//! Fulfillment writes are double-guarded: the legal transition is checked in
//! Rust via [`fulfillment_transition`], then the UPDATE re-asserts the
//! expected current state in its WHERE clause so a concurrent writer cannot
//! slip a second transition through.

use shared::models::{
    Order, OrderAddressView, OrderItem, OrderItemInput, OrderLineView, OrderUserView, OrderView,
};
use shared::order::{
    FulfillmentEvent, FulfillmentStatus, PaymentStatus, fulfillment_transition,
};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;
use std::collections::HashMap;

use super::product;

/// Create an order with its line items in a single transaction.
///
/// Validates the client-supplied `gross_amount` against the item sum before
/// touching the database; any item insert failure rolls back the header too.
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    transaction_id: &str,
    items: &[OrderItemInput],
    gross_amount: i64,
) -> AppResult<Order> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let expected: i64 = items
        .iter()
        .map(|item| item.price * item.quantity + item.shipping)
        .sum();
    if expected != gross_amount {
        return Err(AppError::with_message(
            ErrorCode::AmountMismatch,
            format!("gross_amount {gross_amount} does not match item total {expected}"),
        )
        .with_detail("expected", expected)
        .with_detail("received", gross_amount));
    }

    let created_at = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let order_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (transaction_id, user_id, gross_amount, payment_status, fulfillment_status, created_at)
         VALUES (?, ?, ?, 'pending', 'placed', ?)
         RETURNING id",
    )
    .bind(transaction_id)
    .bind(user_id)
    .bind(gross_amount)
    .bind(created_at)
    .fetch_one(&mut *tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, quantity, price, shipping)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(item.id)
        .bind(item.quantity)
        .bind(item.price)
        .bind(item.shipping)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))
}

/// Find an order by ID
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, transaction_id, user_id, gross_amount, payment_status,
                fulfillment_status, resi, created_at
         FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

/// Find an order by its external transaction reference
pub async fn find_by_transaction(pool: &SqlitePool, transaction_id: &str) -> AppResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, transaction_id, user_id, gross_amount, payment_status,
                fulfillment_status, resi, created_at
         FROM orders WHERE transaction_id = ?",
    )
    .bind(transaction_id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

/// Line items of an order
pub async fn items_for(pool: &SqlitePool, order_id: i64) -> AppResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, product_id, quantity, price, shipping
         FROM order_items WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Write a payment status, refusing to overwrite a terminal one.
///
/// Returns `false` when the guard rejected the write (the row was already
/// `success` or `failure`, or the reference is unknown). The NOT IN guard in
/// SQL is what makes terminal statuses monotonic under concurrent callbacks.
pub async fn set_payment_status(
    pool: &SqlitePool,
    transaction_id: &str,
    next: PaymentStatus,
) -> AppResult<bool> {
    let result = sqlx::query(
        "UPDATE orders SET payment_status = ?
         WHERE transaction_id = ? AND payment_status NOT IN ('success', 'failure')",
    )
    .bind(next)
    .bind(transaction_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Confirm an order: `placed -> processing`, decrementing stock for every
/// line item inside one transaction. Any line without enough stock aborts the
/// whole confirmation and leaves every counter untouched.
pub async fn confirm(pool: &SqlitePool, order_id: i64) -> AppResult<Order> {
    let mut order = find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))?;

    let next = fulfillment_transition(order.fulfillment_status, FulfillmentEvent::Confirm)
        .map_err(|e| AppError::invalid_transition(e.to_string()))?;

    let mut tx = pool.begin().await?;

    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, product_id, quantity, price, shipping
         FROM order_items WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(&mut *tx)
    .await?;

    for item in &items {
        product::decrement_stock(&mut *tx, item.product_id, item.quantity).await?;
    }

    // Re-assert the pre-state so a concurrent confirm cannot decrement twice
    let result = sqlx::query(
        "UPDATE orders SET fulfillment_status = ? WHERE id = ? AND fulfillment_status = ?",
    )
    .bind(next)
    .bind(order_id)
    .bind(order.fulfillment_status)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::invalid_transition(format!(
            "Order {order_id} was modified concurrently"
        )));
    }

    tx.commit().await?;

    order.fulfillment_status = next;
    Ok(order)
}

/// Attach a carrier tracking code: `processing -> shipping`
pub async fn ship(pool: &SqlitePool, order_id: i64, resi: &str) -> AppResult<Order> {
    let mut order = apply_event(pool, order_id, FulfillmentEvent::Ship, Some(resi)).await?;
    order.resi = Some(resi.to_string());
    Ok(order)
}

/// Mark the parcel delivered: `shipping -> delivered`
pub async fn deliver(pool: &SqlitePool, order_id: i64) -> AppResult<Order> {
    apply_event(pool, order_id, FulfillmentEvent::Deliver, None).await
}

/// Cancel from any non-terminal state.
///
/// Cancellation does not restock: stock decremented by a prior confirm stays
/// decremented, matching the manual restock workflow.
pub async fn cancel(pool: &SqlitePool, order_id: i64) -> AppResult<Order> {
    apply_event(pool, order_id, FulfillmentEvent::Cancel, None).await
}

/// Shared guarded-transition write for the stockless events
async fn apply_event(
    pool: &SqlitePool,
    order_id: i64,
    event: FulfillmentEvent,
    resi: Option<&str>,
) -> AppResult<Order> {
    let mut order = find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id))?;

    let next = fulfillment_transition(order.fulfillment_status, event)
        .map_err(|e| AppError::invalid_transition(e.to_string()))?;

    let result = sqlx::query(
        "UPDATE orders SET fulfillment_status = ?, resi = COALESCE(?, resi)
         WHERE id = ? AND fulfillment_status = ?",
    )
    .bind(next)
    .bind(resi)
    .bind(order_id)
    .bind(order.fulfillment_status)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::invalid_transition(format!(
            "Order {order_id} was modified concurrently"
        )));
    }

    order.fulfillment_status = next;
    Ok(order)
}

// =============================================================================
// Projections
// =============================================================================

#[derive(sqlx::FromRow)]
struct HeaderRow {
    id: i64,
    transaction_id: String,
    gross_amount: i64,
    payment_status: PaymentStatus,
    fulfillment_status: FulfillmentStatus,
    resi: Option<String>,
    created_at: i64,
    user_id: i64,
    user_name: String,
    email: String,
    phone: String,
    province: String,
    city: String,
    district: String,
    village: String,
    detail: String,
    shipping: i64,
}

#[derive(sqlx::FromRow)]
struct LineRow {
    order_id: i64,
    product_id: i64,
    name: String,
    quantity: i64,
    price: i64,
    shipping: i64,
    capital: i64,
    profit: i64,
}

const HEADER_SELECT: &str = "SELECT orders.id, orders.transaction_id, orders.gross_amount,
        orders.payment_status, orders.fulfillment_status, orders.resi, orders.created_at,
        users.id AS user_id, users.name AS user_name, users.email, users.phone,
        address.province, address.city, address.district, address.village,
        address.detail, address.shipping
 FROM orders
 INNER JOIN users ON users.id = orders.user_id
 INNER JOIN address ON address.user_id = users.id";

const LINE_SELECT: &str = "SELECT order_items.order_id, order_items.product_id, product.name,
        order_items.quantity, order_items.price, order_items.shipping,
        order_items.quantity * product.capital AS capital,
        order_items.price - order_items.quantity * product.capital AS profit
 FROM order_items
 INNER JOIN product ON product.id = order_items.product_id
 INNER JOIN orders ON orders.id = order_items.order_id";

/// List orders for a caller.
///
/// This is the authorization boundary of the read path: admins see every
/// order with cost figures, other users see only their own orders with
/// `capital`/`profit` redacted.
pub async fn list_for_viewer(
    pool: &SqlitePool,
    viewer_id: i64,
    is_admin: bool,
) -> AppResult<Vec<OrderView>> {
    let (headers, lines) = if is_admin {
        let headers = sqlx::query_as::<_, HeaderRow>(&format!(
            "{HEADER_SELECT} ORDER BY orders.created_at DESC, orders.id DESC"
        ))
        .fetch_all(pool)
        .await?;
        let lines = sqlx::query_as::<_, LineRow>(&format!("{LINE_SELECT} ORDER BY order_items.id"))
            .fetch_all(pool)
            .await?;
        (headers, lines)
    } else {
        let headers = sqlx::query_as::<_, HeaderRow>(&format!(
            "{HEADER_SELECT} WHERE orders.user_id = ? ORDER BY orders.created_at DESC, orders.id DESC"
        ))
        .bind(viewer_id)
        .fetch_all(pool)
        .await?;
        let lines = sqlx::query_as::<_, LineRow>(&format!(
            "{LINE_SELECT} WHERE orders.user_id = ? ORDER BY order_items.id"
        ))
        .bind(viewer_id)
        .fetch_all(pool)
        .await?;
        (headers, lines)
    };

    let mut views = assemble(headers, lines);
    if !is_admin {
        for view in &mut views {
            view.redact_costs();
        }
    }
    Ok(views)
}

/// Single-order view with the same ownership and redaction rules as
/// [`list_for_viewer`]. A non-admin asking for someone else's order gets
/// `PermissionDenied`, not a silent empty result.
pub async fn view_for_viewer(
    pool: &SqlitePool,
    order_id: i64,
    viewer_id: i64,
    is_admin: bool,
) -> AppResult<OrderView> {
    let headers = sqlx::query_as::<_, HeaderRow>(&format!("{HEADER_SELECT} WHERE orders.id = ?"))
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    let lines = sqlx::query_as::<_, LineRow>(&format!(
        "{LINE_SELECT} WHERE orders.id = ? ORDER BY order_items.id"
    ))
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    let mut views = assemble(headers, lines);
    let mut view = views
        .pop()
        .ok_or_else(|| AppError::order_not_found(order_id))?;

    if !is_admin {
        if view.user.user_id != viewer_id {
            return Err(AppError::forbidden("Not your order"));
        }
        view.redact_costs();
    }
    Ok(view)
}

fn assemble(headers: Vec<HeaderRow>, lines: Vec<LineRow>) -> Vec<OrderView> {
    let mut by_order: HashMap<i64, Vec<OrderLineView>> = HashMap::new();
    for line in lines {
        by_order.entry(line.order_id).or_default().push(OrderLineView {
            id: line.product_id,
            name: line.name,
            quantity: line.quantity,
            price: line.price,
            shipping: line.shipping,
            capital: Some(line.capital),
            profit: Some(line.profit),
        });
    }

    headers
        .into_iter()
        .map(|h| OrderView {
            id: h.id,
            transaction_id: h.transaction_id,
            payment_status: h.payment_status,
            fulfillment_status: h.fulfillment_status,
            resi: h.resi,
            user: OrderUserView {
                user_id: h.user_id,
                name: h.user_name,
                email: h.email,
                phone: h.phone,
            },
            product: by_order.remove(&h.id).unwrap_or_default(),
            gross_amount: h.gross_amount,
            address: OrderAddressView {
                province: h.province,
                city: h.city,
                district: h.district,
                village: h.village,
                detail: h.detail,
                shipping: h.shipping,
            },
            created_at: h.created_at,
        })
        .collect()
}
