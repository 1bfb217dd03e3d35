//! 活动报名的 HTTP 处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{parse_id, ApiJson};
use crate::{
    auth::jwt::Identity, error::AppError, middleware::AppState,
    models::registration::CreateRegistrationRequest,
};

pub async fn create_registration(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ApiJson(req): ApiJson<CreateRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let registration = state.registration_service.create(&identity, req).await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

pub async fn get_registration(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "registration")?;
    let registration = state.registration_service.get(&identity, id).await?;

    Ok(Json(registration))
}

pub async fn list_by_user(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_id(&user_id, "user")?;
    let registrations = state.registration_service.list_by_user(&identity, user_id).await?;

    Ok(Json(registrations))
}

pub async fn list_by_event(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event_id = parse_id(&event_id, "event")?;
    let registrations = state.registration_service.list_by_event(&identity, event_id).await?;

    Ok(Json(registrations))
}
