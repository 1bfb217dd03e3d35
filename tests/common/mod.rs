//! 测试公共模块
//! 提供测试配置、内存存储上的应用实例和 HTTP 请求辅助函数
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use event_hub::{
    auth::jwt::Identity,
    config::{
        AppConfig, ApplicationConfig, DatabaseConfig, DeploymentProfile, LoggingConfig,
        SecurityConfig, ServerConfig,
    },
    middleware::AppState,
    repository::Stores,
    routes,
};
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

/// 创建测试配置（内存存储、最低哈希开销）
pub fn create_test_config() -> AppConfig {
    AppConfig {
        app: ApplicationConfig {
            environment: DeploymentProfile::Development,
        },
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(), // 使用随机端口
            graceful_shutdown_timeout_secs: 5,
        },
        database: DatabaseConfig {
            url: None,
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Some(Secret::new(TEST_JWT_SECRET.to_string())),
            token_ttl_secs: 3600,
            password_min_length: 8,
            hash_memory_kib: 64,
            hash_iterations: 1,
            hash_parallelism: 1,
        },
    }
}

/// 创建测试应用状态
pub fn create_test_app_state() -> Arc<AppState> {
    let state = AppState::new(create_test_config(), Stores::memory())
        .expect("Failed to build app state");
    Arc::new(state)
}

/// 创建测试应用（路由 + 状态）
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let state = create_test_app_state();
    (routes::create_router(state.clone()), state)
}

/// 发送 JSON 请求并返回状态码与响应体
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// 注册用户，返回 (用户 ID, 令牌)
pub async fn register_user(app: &Router, name: &str, email: &str, password: &str) -> (i64, String) {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    (
        body["user"]["id"].as_i64().unwrap(),
        body["token"].as_str().unwrap().to_string(),
    )
}

/// 由用户 ID 构造身份
pub fn identity(user_id: i64, name: &str, email: &str) -> Identity {
    Identity {
        user_id,
        name: name.to_string(),
        email: email.to_string(),
    }
}

/// 标准活动请求体
pub fn event_body(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "date": "2026-09-01",
        "location": "Montreal",
        "description": "Talks and workshops",
        "price": "Free",
        "image": "https://example.com/event.png",
        "category": "Tech"
    })
}
