//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::{auth::middleware::jwt_auth_middleware, handlers, middleware::AppState};

/// 请求体大小上限
const MAX_BODY_BYTES: usize = 64 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // 无需认证的 API
    let open_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/users/{id}", get(handlers::user::get_user))
        .route("/api/events", get(handlers::event::list_events))
        .route("/api/events/{id}", get(handlers::event::get_event))
        .route(
            "/api/events/organizer/{id}",
            get(handlers::event::list_by_organizer),
        );

    // 需要认证的路由
    let authenticated_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/users/{id}", put(handlers::user::update_user))
        .route("/api/events", post(handlers::event::create_event))
        .route(
            "/api/events/{id}",
            put(handlers::event::update_event).delete(handlers::event::delete_event),
        )
        .route(
            "/api/registrations",
            post(handlers::registration::create_registration),
        )
        .route(
            "/api/registrations/{id}",
            get(handlers::registration::get_registration),
        )
        .route(
            "/api/registrations/user/{id}",
            get(handlers::registration::list_by_user),
        )
        .route(
            "/api/registrations/event/{id}",
            get(handlers::registration::list_by_event),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            jwt_auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(open_routes)
        .merge(authenticated_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .with_state(state)
}
