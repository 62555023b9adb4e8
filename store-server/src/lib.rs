//! Store Server - 订单与支付生命周期后端
//!
//! # 架构概述
//!
//! 本模块是 Store Server 的主入口，提供以下核心功能：
//!
//! - **订单** (`api/orders`): 创建、支付回调、履约状态机、角色投影
//! - **购物车** (`api/carts`): 整车创建/删除
//! - **商品** (`api/products`): 目录读写与库存
//! - **支付** (`payment`): 网关收款调用与 webhook 落库
//! - **认证** (`auth`): JWT 认证与管理员授权
//! - **数据库** (`db`): SQLite (WAL) + 事务性仓储
//!
//! # 模块结构
//!
//! ```text
//! store-server/src/
//! ├── core/          # 配置、状态、服务器生命周期
//! ├── auth/          # JWT 认证、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── payment/       # 支付网关客户端、回调处理
//! ├── db/            # 连接池、迁移、仓储
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod payment;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Audit logging macro - 记录资源变更到 "audit" target
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $resource:expr, $id:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = $resource,
            id = %$id,
            $($key = $value),*
        );
    };
}

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: dotenv + 日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 不存在不算错误
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __
  / ___// /_____  ________
  \__ \/ __/ __ \/ ___/ _ \
 ___/ / /_/ /_/ / /  /  __/
/____/\__/\____/_/   \___/
    "#
    );
}
