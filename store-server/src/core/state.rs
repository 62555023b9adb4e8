use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::payment::GatewayClient;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 连接池实现浅拷贝，每个请求处理函数克隆一份。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | gateway | GatewayClient | 支付网关客户端 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 支付网关客户端
    pub gateway: GatewayClient,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：数据库 (含迁移) → JWT 服务 → 支付网关客户端
    ///
    /// # Panics
    ///
    /// 数据库或网关客户端初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        let db = DbService::new(&config.database_path)
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let gateway = GatewayClient::new(
            &config.payment.base_url,
            &config.payment.server_key,
            config.payment.timeout_ms,
        )
        .expect("Failed to build payment gateway client");

        Self {
            config: config.clone(),
            db,
            jwt_service,
            gateway,
        }
    }

    /// 使用现成的数据库构造状态 (测试用)
    pub fn with_db(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let gateway = GatewayClient::new(
            &config.payment.base_url,
            &config.payment.server_key,
            config.payment.timeout_ms,
        )
        .expect("Failed to build payment gateway client");

        Self {
            config,
            db,
            jwt_service,
            gateway,
        }
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// 获取 JWT 服务
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
