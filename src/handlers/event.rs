//! 活动的 HTTP 处理器

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{parse_id, ApiJson};
use crate::{
    auth::jwt::Identity,
    error::AppError,
    middleware::AppState,
    models::event::{CreateEventRequest, EventChanges, EventListQuery},
};

/// 活动列表，默认只返回公开活动
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let events = state
        .event_service
        .list(query.public_only.unwrap_or(true))
        .await?;

    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "event")?;
    let event = state.event_service.get(id).await?;

    Ok(Json(event))
}

/// 某组织者的全部活动
pub async fn list_by_organizer(
    State(state): State<Arc<AppState>>,
    Path(organizer_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let organizer_id = parse_id(&organizer_id, "organizer")?;
    let events = state.event_service.list_by_organizer(organizer_id).await?;

    Ok(Json(events))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ApiJson(req): ApiJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_service.create(&identity, req).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// 修改活动（仅组织者）
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<EventChanges>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "event")?;
    let event = state.event_service.update(&identity, id, changes).await?;

    Ok(Json(event))
}

/// 删除活动（仅组织者）
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "event")?;
    state.event_service.delete(&identity, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
