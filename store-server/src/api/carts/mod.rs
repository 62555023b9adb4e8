//! Cart API 模块 (购物车)

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/create-cart", post(handler::create))
        .route("/get-carts", get(handler::list))
        .route("/delete-cart/{id}", delete(handler::delete))
}
