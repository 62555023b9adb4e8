//! Product API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::audit_log;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TEXT_LEN, validate_non_negative, validate_optional_text,
    validate_required_text,
};
use shared::models::{Product, ProductCreate};
use shared::{ApiResponse, AppError, AppResult};

const RESOURCE: &str = "product";

/// GET /product/get-products - 商品列表
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let products = product::find_all(state.pool()).await?;
    Ok(Json(ApiResponse::success_with_message(
        products,
        "Success get all products",
    )))
}

/// GET /product/get-product/{id} - 单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let found = product::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::product_not_found(id))?;
    Ok(Json(ApiResponse::success_with_message(
        found,
        "Success get product",
    )))
}

/// POST /product/create-product - 创建或更新商品
pub async fn upsert(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_TEXT_LEN)?;
    validate_non_negative(payload.price, "price")?;
    validate_non_negative(payload.capital, "capital")?;
    validate_non_negative(payload.stock, "stock")?;

    let saved = product::upsert(state.pool(), payload).await?;

    audit_log!("saved", RESOURCE, saved.id, operator_id = current_user.id);

    Ok(Json(ApiResponse::success_with_message(
        saved,
        "Success save product",
    )))
}

/// DELETE /product/delete-product/{id} - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    product::delete(state.pool(), id).await?;

    audit_log!("deleted", RESOURCE, id, operator_id = current_user.id);

    Ok(Json(ApiResponse::ok("Success delete product")))
}
