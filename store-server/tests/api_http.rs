//! HTTP surface tests driven through the full router with `tower::oneshot`:
//! authentication gating, admin gating and the public webhook path.

mod common;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use shared::order::PaymentStatus;
use store_server::db::repository::order;
use store_server::db::DbService;
use store_server::{Config, CurrentUser, ServerState};

async fn setup_app() -> (Router, ServerState) {
    let db = common::setup_db().await;
    let state = ServerState::with_db(Config::from_env(), db);
    (store_server::api::build_app(state.clone()), state)
}

fn bearer(state: &ServerState, id: i64, name: &str, email: &str, level: &str) -> String {
    let token = state
        .jwt_service
        .generate_token(&CurrentUser {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: "0811000000".to_string(),
            level: level.to_string(),
        })
        .expect("token generation");
    format!("Bearer {token}")
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.expect("read body").to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

fn pool_db(state: &ServerState) -> &DbService {
    &state.db
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _state) = setup_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["database"], json!("ok"));
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let (app, _state) = setup_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/order/get-orders")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_admin_routes_refuse_regular_users() {
    let (app, state) = setup_app().await;
    let user = common::seed_user(&pool_db(&state).pool, "budi", "budi@example.com", "user").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/order/confirm/1")
                .header(header::AUTHORIZATION, bearer(&state, user, "budi", "budi@example.com", "user"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_webhook_is_public_and_updates_payment() {
    let (app, state) = setup_app().await;
    let pool = &pool_db(&state).pool;
    let user = common::seed_user(pool, "budi", "budi@example.com", "user").await;
    let product = common::seed_product(pool, "Kopi", 100, 60, 10).await;

    let txref = "ORDER-WEBHK-00001";
    order::create(
        pool,
        user,
        txref,
        &[shared::models::OrderItemInput {
            id: product,
            quantity: 1,
            price: 100,
            shipping: 0,
        }],
        100,
    )
    .await
    .expect("create order");

    let payload = json!({
        "order_id": txref,
        "transaction_status": "settlement"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/order/transaction-notification")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["success"], json!(true));

    let current = order::find_by_transaction(pool, txref)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(current.payment_status, PaymentStatus::Success);
}

#[tokio::test]
async fn test_get_orders_masks_costs_over_http() {
    let (app, state) = setup_app().await;
    let pool = &pool_db(&state).pool;
    let user = common::seed_user(pool, "budi", "budi@example.com", "user").await;
    let product = common::seed_product(pool, "Kopi", 100, 60, 10).await;

    order::create(
        pool,
        user,
        "ORDER-MASKD-00001",
        &[shared::models::OrderItemInput {
            id: product,
            quantity: 2,
            price: 100,
            shipping: 0,
        }],
        200,
    )
    .await
    .expect("create order");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/order/get-orders")
                .header(header::AUTHORIZATION, bearer(&state, user, "budi", "budi@example.com", "user"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["success"], json!(true));
    let line = &body["data"][0]["product"][0];
    assert_eq!(line["quantity"], json!(2));
    assert_eq!(line["capital"], Value::Null);
    assert_eq!(line["profit"], Value::Null);
}
