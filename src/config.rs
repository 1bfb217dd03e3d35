//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// 未配置签名密钥时使用的开发密钥，生产环境禁止使用
pub const DEV_FALLBACK_JWT_SECRET: &str = "event-hub-development-only-signing-key!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentProfile {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// 部署环境: development, production
    pub environment: DeploymentProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:3000"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库连接 URL；缺省时使用内存存储
    pub url: Option<Secret<String>>,
    /// 最大连接数
    pub max_connections: u32,
    /// 最小连接数
    pub min_connections: u32,
    /// 获取连接超时时间（秒）
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// JWT 签名密钥（使用 Secret 包装，防止日志泄露）
    pub jwt_secret: Option<Secret<String>>,
    /// 令牌有效期（秒）
    pub token_ttl_secs: u64,
    /// 密码最小长度
    pub password_min_length: usize,
    /// Argon2 内存开销（KiB）
    pub hash_memory_kib: u32,
    /// Argon2 迭代次数
    pub hash_iterations: u32,
    /// Argon2 并行度
    pub hash_parallelism: u32,
}

impl SecurityConfig {
    /// 返回签名密钥；未配置时回退到开发密钥
    pub fn signing_secret(&self) -> (&str, bool) {
        match &self.jwt_secret {
            Some(secret) => (secret.expose_secret().as_str(), false),
            None => (DEV_FALLBACK_JWT_SECRET, true),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: ApplicationConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("app.environment", "development")?
            .set_default("server.addr", "0.0.0.0:3000")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.token_ttl_secs", 604800)?
            .set_default("security.password_min_length", 8)?
            .set_default("security.hash_memory_kib", 19456)?
            .set_default("security.hash_iterations", 2)?
            .set_default("security.hash_parallelism", 1)?;

        // 从环境变量加载配置（前缀为 EVENTHUB_）
        settings = settings.add_source(
            Environment::with_prefix("EVENTHUB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == DeploymentProfile::Production
    }

    /// 验证配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 验证端口范围
        if let Some(port_str) = self.server.addr.split(':').next_back() {
            if let Ok(port) = port_str.parse::<u16>() {
                if port != 0 && port < 1024 {
                    return Err(ConfigError::Message("Server port should be >= 1024".to_string()));
                }
            }
        }

        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        // 验证数据库连接池配置
        if self.database.max_connections < self.database.min_connections {
            return Err(ConfigError::Message(
                "max_connections must be >= min_connections".to_string(),
            ));
        }

        // 验证 JWT 密钥长度（至少 32 字符）
        if let Some(secret) = &self.security.jwt_secret {
            if secret.expose_secret().len() < 32 {
                return Err(ConfigError::Message(
                    "JWT secret must be at least 32 characters long".to_string(),
                ));
            }
        }

        // 验证令牌过期时间
        if self.security.token_ttl_secs < 60 || self.security.token_ttl_secs > 2592000 {
            return Err(ConfigError::Message(
                "token_ttl_secs must be between 60 and 2592000 (1 minute to 30 days)".to_string(),
            ));
        }

        // 验证密码策略
        if self.security.password_min_length < 6 || self.security.password_min_length > 128 {
            return Err(ConfigError::Message(
                "password_min_length must be between 6 and 128".to_string(),
            ));
        }

        if self.security.hash_iterations == 0 || self.security.hash_parallelism == 0 {
            return Err(ConfigError::Message(
                "hash_iterations and hash_parallelism must be >= 1".to_string(),
            ));
        }

        // 生产环境必须显式配置密钥与数据库
        if self.is_production() {
            if self.security.jwt_secret.is_none() {
                return Err(ConfigError::Message(
                    "security.jwt_secret must be set in production".to_string(),
                ));
            }
            if self.database.url.is_none() {
                return Err(ConfigError::Message(
                    "database.url must be set in production".to_string(),
                ));
            }
        }

        Ok(())
    }
}
