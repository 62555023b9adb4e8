//! Product API 模块 (商品目录)

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post},
};

use crate::auth;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/product", routes())
}

fn routes() -> Router<ServerState> {
    // Catalog writes are admin-only; reads are public
    let admin = Router::new()
        .route("/add-product", post(handler::upsert))
        .route("/delete-product/{id}", delete(handler::delete))
        .route_layer(axum_middleware::from_fn(auth::require_admin));

    Router::new()
        .route("/get-products", get(handler::list))
        .route("/get-product/{id}", get(handler::get_by_id))
        .merge(admin)
}
