use crate::auth::JwtConfig;

/// 支付网关配置
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// 网关 API 基础地址
    pub base_url: String,
    /// 服务器密钥 (Basic auth 用户名)
    pub server_key: String,
    /// 请求超时 (毫秒)
    pub timeout_ms: u64,
}

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | store.db | SQLite 数据库文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | PAYMENT_BASE_URL | https://app.sandbox.midtrans.com | 支付网关地址 |
/// | PAYMENT_SERVER_KEY | (empty) | 支付网关服务器密钥 |
/// | PAYMENT_TIMEOUT_MS | 15000 | 网关请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=/data/store.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 支付网关配置
    pub payment: PaymentConfig,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "store.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),
            payment: PaymentConfig {
                base_url: std::env::var("PAYMENT_BASE_URL")
                    .unwrap_or_else(|_| "https://app.sandbox.midtrans.com".into()),
                server_key: std::env::var("PAYMENT_SERVER_KEY").unwrap_or_default(),
                timeout_ms: std::env::var("PAYMENT_TIMEOUT_MS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(15000),
            },
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
