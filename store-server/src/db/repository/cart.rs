//! Cart repository
//!
//! 购物车数据访问：创建、查询、删除都以整车为单位。

use shared::models::{Cart, CartItemInput, CartLineView, CartView};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Create a cart with its items in one transaction
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    items: &[CartItemInput],
) -> AppResult<Cart> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let created_at = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let cart_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO cart (user_id, created_at) VALUES (?, ?) RETURNING id",
    )
    .bind(user_id)
    .bind(created_at)
    .fetch_one(&mut *tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO cart_items (cart_id, product_id, quantity, price) VALUES (?, ?, ?, ?)",
        )
        .bind(cart_id)
        .bind(item.id)
        .bind(item.quantity)
        .bind(item.price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(Cart {
        id: cart_id,
        user_id,
        created_at,
    })
}

#[derive(sqlx::FromRow)]
struct CartHeaderRow {
    cart_id: i64,
    user_name: String,
    email: String,
    phone: String,
}

#[derive(sqlx::FromRow)]
struct CartLineRow {
    cart_id: i64,
    product_id: i64,
    name: String,
    quantity: i64,
    price: i64,
}

/// List a user's carts with product names resolved
pub async fn list_views(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<CartView>> {
    let headers = sqlx::query_as::<_, CartHeaderRow>(
        "SELECT cart.id AS cart_id, users.name AS user_name, users.email, users.phone
         FROM cart INNER JOIN users ON users.id = cart.user_id
         WHERE cart.user_id = ?
         ORDER BY cart.id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let lines = sqlx::query_as::<_, CartLineRow>(
        "SELECT cart_items.cart_id, cart_items.product_id, product.name,
                cart_items.quantity, cart_items.price
         FROM cart_items
         INNER JOIN product ON product.id = cart_items.product_id
         INNER JOIN cart ON cart.id = cart_items.cart_id
         WHERE cart.user_id = ?
         ORDER BY cart_items.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut by_cart: HashMap<i64, Vec<CartLineView>> = HashMap::new();
    for line in lines {
        by_cart.entry(line.cart_id).or_default().push(CartLineView {
            id: line.product_id,
            name: line.name,
            quantity: line.quantity,
            price: line.price,
        });
    }

    Ok(headers
        .into_iter()
        .map(|h| CartView {
            cart_id: h.cart_id,
            user_name: h.user_name,
            email: h.email,
            phone: h.phone,
            products: by_cart.remove(&h.cart_id).unwrap_or_default(),
        })
        .collect())
}

/// Delete a cart and its items.
///
/// Only the owning user may delete a cart; there is no admin override on
/// this path.
pub async fn delete(pool: &SqlitePool, cart_id: i64, user_id: i64) -> AppResult<()> {
    let owner = sqlx::query_scalar::<_, i64>("SELECT user_id FROM cart WHERE id = ?")
        .bind(cart_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::CartNotFound, format!("Cart {cart_id} not found"))
        })?;

    if owner != user_id {
        return Err(AppError::forbidden("Not your cart"));
    }

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM cart_items WHERE cart_id = ?")
        .bind(cart_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM cart WHERE id = ?")
        .bind(cart_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(())
}
