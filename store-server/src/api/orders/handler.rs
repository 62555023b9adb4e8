//! Order API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::audit_log;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::payment::{self, CallbackOutcome, CustomerDetails};
use crate::utils::validation::{MAX_RESI_LEN, validate_non_negative, validate_positive, validate_required_text};
use shared::models::{NotificationPayload, Order, OrderCreate, OrderView};
use shared::{ApiResponse, AppResult};

const RESOURCE: &str = "order";

/// Created order plus the gateway's charge response (Snap token), passed
/// through verbatim for the client to open the payment page
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order: Order,
    pub payment: Value,
}

/// POST /order/create-order - 创建订单并向网关发起收款
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<ApiResponse<CreateOrderResponse>>> {
    for item in &payload.products {
        validate_positive(item.quantity, "quantity")?;
        validate_non_negative(item.price, "price")?;
        validate_non_negative(item.shipping, "shipping")?;
    }

    let transaction_id = shared::util::transaction_ref();
    let order = order::create(
        state.pool(),
        current_user.id,
        &transaction_id,
        &payload.products,
        payload.gross_amount,
    )
    .await?;

    // Charge after the order is durably stored; the webhook resolves the
    // payment status asynchronously either way
    let customer = CustomerDetails {
        first_name: current_user.name.clone(),
        email: current_user.email.clone(),
        phone: current_user.phone.clone(),
    };
    let payment = state
        .gateway
        .charge(&order.transaction_id, order.gross_amount, &customer)
        .await?;

    audit_log!(
        "created",
        RESOURCE,
        order.id,
        user_id = current_user.id,
        gross_amount = order.gross_amount
    );

    Ok(Json(ApiResponse::success_with_message(
        CreateOrderResponse { order, payment },
        "Success create order",
    )))
}

/// POST /order/transaction-notification - 支付网关回调
///
/// Always acknowledges with 200 on anything short of a database failure,
/// otherwise the gateway keeps retrying.
pub async fn transaction_notification(
    State(state): State<ServerState>,
    Json(payload): Json<NotificationPayload>,
) -> AppResult<Json<ApiResponse<()>>> {
    let outcome = payment::apply_notification(state.pool(), &payload).await?;

    let message = match outcome {
        CallbackOutcome::Applied(status) => {
            format!("Payment status updated to {}", status.as_str())
        }
        CallbackOutcome::Ignored => "Notification acknowledged".to_string(),
        CallbackOutcome::UnknownOrder => "Order not found, acknowledged".to_string(),
    };

    Ok(Json(ApiResponse::ok(message)))
}

/// GET /order/get-orders - 获取订单列表 (角色感知)
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<OrderView>>>> {
    let views =
        order::list_for_viewer(state.pool(), current_user.id, current_user.is_admin()).await?;
    Ok(Json(ApiResponse::success_with_message(
        views,
        "Success get all orders",
    )))
}

/// GET /order/get-order/{id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderView>>> {
    let view =
        order::view_for_viewer(state.pool(), id, current_user.id, current_user.is_admin()).await?;
    Ok(Json(ApiResponse::success_with_message(
        view,
        "Success get order",
    )))
}

/// PUT /order/confirm/{id} - 确认订单 (扣减库存)
pub async fn confirm(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = order::confirm(state.pool(), id).await?;

    audit_log!("confirmed", RESOURCE, id, operator_id = current_user.id);

    Ok(Json(ApiResponse::success_with_message(
        order,
        "Success confirm order",
    )))
}

/// give-resi 请求体
#[derive(Debug, Deserialize)]
pub struct GiveResiPayload {
    pub resi: String,
}

/// PUT /order/give-resi/{id} - 填写运单号并发货
pub async fn give_resi(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<GiveResiPayload>,
) -> AppResult<Json<ApiResponse<Order>>> {
    validate_required_text(&payload.resi, "resi", MAX_RESI_LEN)?;

    let order = order::ship(state.pool(), id, payload.resi.trim()).await?;

    audit_log!(
        "shipped",
        RESOURCE,
        id,
        operator_id = current_user.id,
        resi = payload.resi.trim()
    );

    Ok(Json(ApiResponse::success_with_message(
        order,
        "Success give resi",
    )))
}

/// PUT /order/deliver/{id} - 确认签收
pub async fn deliver(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = order::deliver(state.pool(), id).await?;

    audit_log!("delivered", RESOURCE, id, operator_id = current_user.id);

    Ok(Json(ApiResponse::success_with_message(
        order,
        "Success deliver order",
    )))
}

/// PUT /order/cancel-order/{id} - 取消订单 (不回补库存)
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = order::cancel(state.pool(), id).await?;

    audit_log!("cancelled", RESOURCE, id, operator_id = current_user.id);

    Ok(Json(ApiResponse::success_with_message(
        order,
        "Success cancel order",
    )))
}
