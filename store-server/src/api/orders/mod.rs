//! Order API 模块 (订单生命周期)

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::auth;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/order", routes())
}

fn routes() -> Router<ServerState> {
    // Fulfillment transitions are admin-only
    let admin = Router::new()
        .route("/confirm/{id}", put(handler::confirm))
        .route("/give-resi/{id}", put(handler::give_resi))
        .route("/deliver/{id}", put(handler::deliver))
        .route("/cancel-order/{id}", put(handler::cancel))
        .route_layer(axum_middleware::from_fn(auth::require_admin));

    Router::new()
        .route("/create-order", post(handler::create))
        // Gateway callback: public, the provider carries no user token
        .route(
            "/transaction-notification",
            post(handler::transaction_notification),
        )
        .route("/get-orders", get(handler::list))
        .route("/get-order/{id}", get(handler::get_by_id))
        .merge(admin)
}
