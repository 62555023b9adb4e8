//! Product repository
//!
//! 商品数据访问：列表、查询、upsert、库存扣减

use shared::{AppError, AppResult, models::Product, models::ProductCreate};
use sqlx::{SqliteConnection, SqlitePool};

/// List all products
pub async fn find_all(pool: &SqlitePool) -> AppResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, category_id, name, description, price, capital, profit, stock, weight
         FROM product ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(products)
}

/// Find a product by ID
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, category_id, name, description, price, capital, profit, stock, weight
         FROM product WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

/// Insert or update a product.
///
/// `profit` is derived (`price - capital`) and recomputed on every write so
/// the stored column can never drift from its inputs.
pub async fn upsert(pool: &SqlitePool, data: ProductCreate) -> AppResult<Product> {
    let profit = data.price - data.capital;

    let id = match data.id {
        Some(id) => {
            let result = sqlx::query(
                "UPDATE product
                 SET category_id = ?, name = ?, description = ?, price = ?,
                     capital = ?, profit = ?, stock = ?, weight = ?
                 WHERE id = ?",
            )
            .bind(data.category_id)
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.price)
            .bind(data.capital)
            .bind(profit)
            .bind(data.stock)
            .bind(data.weight)
            .bind(id)
            .execute(pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::product_not_found(id));
            }
            id
        }
        None => {
            sqlx::query_scalar::<_, i64>(
                "INSERT INTO product (category_id, name, description, price, capital, profit, stock, weight)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING id",
            )
            .bind(data.category_id)
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.price)
            .bind(data.capital)
            .bind(profit)
            .bind(data.stock)
            .bind(data.weight)
            .fetch_one(pool)
            .await?
        }
    };

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::product_not_found(id))
}

/// Delete a product
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::product_not_found(id));
    }
    Ok(())
}

/// Atomically decrement stock inside a caller-owned transaction.
///
/// The UPDATE carries its own `stock >= ?` guard: under concurrent confirms
/// only one writer can win the last units, the loser sees zero rows affected.
pub async fn decrement_stock(
    conn: &mut SqliteConnection,
    product_id: i64,
    quantity: i64,
) -> AppResult<()> {
    let result = sqlx::query("UPDATE product SET stock = stock - ? WHERE id = ? AND stock >= ?")
        .bind(quantity)
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        // Distinguish a missing product from an out-of-stock one
        let stock = sqlx::query_scalar::<_, i64>("SELECT stock FROM product WHERE id = ?")
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?;
        return Err(match stock {
            Some(available) => AppError::insufficient_stock(format!(
                "Product {product_id}: requested {quantity}, only {available} in stock"
            ))
            .with_detail("product_id", product_id)
            .with_detail("requested", quantity)
            .with_detail("available", available),
            None => AppError::product_not_found(product_id),
        });
    }
    Ok(())
}
