//! Cart API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::cart;
use crate::utils::validation::{validate_non_negative, validate_positive};
use shared::models::{Cart, CartCreate, CartView};
use shared::{ApiResponse, AppResult};

/// POST /cart/create-cart - 创建购物车
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CartCreate>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    for item in &payload.products {
        validate_positive(item.quantity, "quantity")?;
        validate_non_negative(item.price, "price")?;
    }

    let created = cart::create(state.pool(), current_user.id, &payload.products).await?;

    Ok(Json(ApiResponse::success_with_message(
        created,
        "Success create cart",
    )))
}

/// GET /cart/get-carts - 获取当前用户的购物车
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<CartView>>>> {
    let views = cart::list_views(state.pool(), current_user.id).await?;
    Ok(Json(ApiResponse::success_with_message(
        views,
        "Success get all carts",
    )))
}

/// DELETE /cart/delete-cart/{id} - 删除购物车 (仅限车主)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    cart::delete(state.pool(), id, current_user.id).await?;
    Ok(Json(ApiResponse::ok("Success delete cart")))
}
