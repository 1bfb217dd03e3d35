//! 用户资料的 HTTP 处理器

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{parse_id, ApiJson};
use crate::{
    auth::jwt::Identity, error::AppError, middleware::AppState, models::user::UpdateUserRequest,
};

/// 获取用户详情
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "user")?;
    let user = state.user_service.get_user(id).await?;

    Ok(Json(user))
}

/// 更新用户资料（仅本人）
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "user")?;
    let user = state.user_service.update_profile(&identity, id, req).await?;

    Ok(Json(user))
}
