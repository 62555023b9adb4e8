//! Shared test fixtures: in-memory database and seed helpers

#![allow(dead_code)]

use sqlx::SqlitePool;
use store_server::db::DbService;

pub async fn setup_db() -> DbService {
    DbService::new_in_memory()
        .await
        .expect("in-memory database should initialize")
}

/// Insert a user with a shipping address, returning the user ID
pub async fn seed_user(pool: &SqlitePool, name: &str, email: &str, level: &str) -> i64 {
    let user_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (name, email, phone, level) VALUES (?, ?, '0811000000', ?) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(level)
    .fetch_one(pool)
    .await
    .expect("user insert should succeed");

    sqlx::query(
        "INSERT INTO address (user_id, province, city, district, village, detail, shipping)
         VALUES (?, 'Jawa Barat', 'Bandung', 'Coblong', 'Dago', 'Jl. Test 1', 9000)",
    )
    .bind(user_id)
    .execute(pool)
    .await
    .expect("address insert should succeed");

    user_id
}

/// Insert a product, returning its ID
pub async fn seed_product(
    pool: &SqlitePool,
    name: &str,
    price: i64,
    capital: i64,
    stock: i64,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO product (name, price, capital, profit, stock) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .bind(capital)
    .bind(price - capital)
    .bind(stock)
    .fetch_one(pool)
    .await
    .expect("product insert should succeed")
}

pub async fn product_stock(pool: &SqlitePool, product_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT stock FROM product WHERE id = ?")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .expect("stock query should succeed")
}
