//! HTTP 中间件与应用状态
//! 请求追踪、共享服务实例

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    auth::{
        jwt::JwtService,
        password::{HashCost, PasswordHasher, PasswordPolicy},
    },
    config::AppConfig,
    error::AppError,
    repository::{Stores, UserStore},
    services::{AuthService, EventService, RegistrationService, UserService},
};

/// 应用状态
///
/// 服务与存储均以 Arc 共享，Clone 只是指针拷贝。
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub jwt_service: Arc<JwtService>,
    // 就绪探针使用
    pub users: Arc<dyn UserStore>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub event_service: Arc<EventService>,
    pub registration_service: Arc<RegistrationService>,
}

impl AppState {
    /// 根据配置和存储构建所有服务
    pub fn new(config: AppConfig, stores: Stores) -> Result<Self, AppError> {
        let jwt_service = Arc::new(JwtService::from_config(&config)?);
        let hasher = Arc::new(PasswordHasher::new(HashCost::from_config(&config))?);
        let policy = PasswordPolicy::from_config(&config);

        let auth_service = Arc::new(AuthService::new(
            stores.users.clone(),
            hasher.clone(),
            jwt_service.clone(),
            policy,
        ));
        let user_service = Arc::new(UserService::new(stores.users.clone(), hasher, policy));
        let event_service = Arc::new(EventService::new(stores.events.clone()));
        let registration_service = Arc::new(RegistrationService::new(
            stores.registrations.clone(),
            stores.events.clone(),
        ));

        Ok(Self {
            config,
            jwt_service,
            users: stores.users,
            auth_service,
            user_service,
            event_service,
            registration_service,
        })
    }
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    // 只记录路径，不记录查询串
    let path = req.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        let start = Instant::now();

        let mut response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // 指标标签使用静态字符串
        let method_name = match method.as_str() {
            "GET" => "GET",
            "POST" => "POST",
            "PUT" => "PUT",
            "DELETE" => "DELETE",
            "PATCH" => "PATCH",
            _ => "OTHER",
        };
        let status_code = match status {
            200 => "200",
            201 => "201",
            204 => "204",
            400 => "400",
            401 => "401",
            403 => "403",
            404 => "404",
            409 => "409",
            500 => "500",
            _ => "other",
        };

        metrics::counter!("http_requests_total", "method" => method_name, "status" => status_code)
            .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            path = %path,
            status = status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        // 在响应头中回传追踪 ID
        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.len() <= 128)
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
