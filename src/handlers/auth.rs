//! 认证相关的 HTTP 处理器

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use super::ApiJson;
use crate::{
    auth::jwt::Identity,
    error::AppError,
    middleware::AppState,
    models::auth::{LoginRequest, RegisterRequest},
};

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.register(req).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.login(req).await?;

    Ok(Json(response))
}

/// 当前用户信息
pub async fn me(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> Result<impl IntoResponse, AppError> {
    let user = state.auth_service.current_user(&identity).await?;

    Ok(Json(user))
}

/// 登出
///
/// 令牌无状态且不可撤销，客户端丢弃令牌即可
pub async fn logout(identity: Identity) -> impl IntoResponse {
    tracing::info!(user_id = identity.user_id, "User logged out");

    Json(json!({"message": "Logged out successfully"}))
}
