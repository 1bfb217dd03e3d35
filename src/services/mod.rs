//! 业务服务层

pub mod auth_service;
pub mod event_service;
pub mod registration_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use event_service::EventService;
pub use registration_service::RegistrationService;
pub use user_service::UserService;

use std::sync::Arc;

use crate::{
    auth::password::{HashError, PasswordHasher},
    error::AppError,
};

/// 在阻塞线程池中执行 Argon2 计算，避免占用异步工作线程
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, HashError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::internal(format!("hashing task failed: {e}")))?
        .map_err(AppError::from)
}

pub(crate) async fn hash_password(
    hasher: &Arc<PasswordHasher>,
    password: String,
) -> Result<String, AppError> {
    let hasher = hasher.clone();
    run_blocking(move || hasher.hash(&password)).await
}

pub(crate) async fn verify_password(
    hasher: &Arc<PasswordHasher>,
    password: String,
    record: String,
) -> Result<bool, AppError> {
    let hasher = hasher.clone();
    run_blocking(move || hasher.verify(&password, &record)).await
}

pub(crate) async fn verify_dummy(
    hasher: &Arc<PasswordHasher>,
    password: String,
) -> Result<(), AppError> {
    let hasher = hasher.clone();
    run_blocking(move || hasher.verify_dummy(&password)).await
}
