//! Health API 模块

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use shared::{ApiResponse, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// GET /health - 健康检查 (含数据库连通性)
async fn health(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<HealthStatus>>> {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(state.pool())
        .await
    {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!("Health check database ping failed: {}", e);
            "unreachable"
        }
    };

    Ok(Json(ApiResponse::success(HealthStatus {
        status: "ok",
        database,
        version: env!("CARGO_PKG_VERSION"),
    })))
}
