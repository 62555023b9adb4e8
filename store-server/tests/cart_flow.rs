//! Cart lifecycle tests: atomic creation, owner-scoped listing and the
//! ownership check on deletion.

mod common;

use shared::ErrorCode;
use shared::models::CartItemInput;
use store_server::db::repository::cart;

fn item(product_id: i64, quantity: i64, price: i64) -> CartItemInput {
    CartItemInput {
        id: product_id,
        quantity,
        price,
    }
}

#[tokio::test]
async fn test_cart_roundtrip() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db.pool, "budi", "budi@example.com", "user").await;
    let kopi = common::seed_product(&db.pool, "Kopi", 100, 60, 10).await;
    let teh = common::seed_product(&db.pool, "Teh", 50, 20, 10).await;

    let created = cart::create(&db.pool, user, &[item(kopi, 2, 100), item(teh, 1, 50)])
        .await
        .expect("create cart");

    let views = cart::list_views(&db.pool, user).await.expect("list");
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].cart_id, created.id);
    assert_eq!(views[0].user_name, "budi");
    assert_eq!(views[0].products.len(), 2);
    assert_eq!(views[0].products[0].name, "Kopi");

    cart::delete(&db.pool, created.id, user).await.expect("delete");

    let views = cart::list_views(&db.pool, user).await.expect("list");
    assert!(views.is_empty());
    let leftover = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cart_items")
        .fetch_one(&db.pool)
        .await
        .expect("count");
    assert_eq!(leftover, 0, "items must be deleted with the cart");
}

#[tokio::test]
async fn test_cart_create_is_atomic() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db.pool, "budi", "budi@example.com", "user").await;
    let kopi = common::seed_product(&db.pool, "Kopi", 100, 60, 10).await;

    cart::create(&db.pool, user, &[item(kopi, 1, 100), item(9999, 1, 50)])
        .await
        .expect_err("missing product must fail the insert");

    let carts = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cart")
        .fetch_one(&db.pool)
        .await
        .expect("count");
    assert_eq!(carts, 0, "no cart header may survive a failed item insert");

    let err = cart::create(&db.pool, user, &[]).await.expect_err("empty cart");
    assert_eq!(err.code, ErrorCode::OrderEmpty);
}

#[tokio::test]
async fn test_cart_delete_checks_ownership() {
    let db = common::setup_db().await;
    let owner = common::seed_user(&db.pool, "budi", "budi@example.com", "user").await;
    let stranger = common::seed_user(&db.pool, "ani", "ani@example.com", "user").await;
    let kopi = common::seed_product(&db.pool, "Kopi", 100, 60, 10).await;

    let created = cart::create(&db.pool, owner, &[item(kopi, 1, 100)])
        .await
        .expect("create cart");

    let err = cart::delete(&db.pool, created.id, stranger)
        .await
        .expect_err("foreign cart must be refused");
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    let err = cart::delete(&db.pool, 424242, owner)
        .await
        .expect_err("unknown cart");
    assert_eq!(err.code, ErrorCode::CartNotFound);

    // Owner's cart is untouched after the refused attempts
    let views = cart::list_views(&db.pool, owner).await.expect("list");
    assert_eq!(views.len(), 1);
}
