//! 用户资料服务

use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use super::hash_password;
use crate::{
    auth::{
        guard::authorize,
        jwt::Identity,
        password::{PasswordHasher, PasswordPolicy},
    },
    error::AppError,
    models::user::{UpdateUserRequest, UserChanges, UserId, UserResponse},
    repository::UserStore,
};

pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    policy: PasswordPolicy,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>, policy: PasswordPolicy) -> Self {
        Self {
            users,
            hasher,
            policy,
        }
    }

    /// 获取用户详情（不含密码哈希）
    pub async fn get_user(&self, id: UserId) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok(UserResponse::from(user))
    }

    /// 更新用户资料，仅本人可操作
    pub async fn update_profile(
        &self,
        identity: &Identity,
        id: UserId,
        req: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        authorize(identity, id)?;

        let req = req.normalized();
        let mut errors = req.validate().err().unwrap_or_else(ValidationErrors::new);
        if let Some(password) = &req.password {
            self.policy.check("password", password, &mut errors);
        }
        if !errors.errors().is_empty() {
            return Err(AppError::Validation(errors));
        }

        let password_hash = match req.password {
            Some(password) => Some(hash_password(&self.hasher, password).await?),
            None => None,
        };

        let changes = UserChanges {
            name: req.name,
            email: req.email,
            password_hash,
            avatar: req.avatar,
            bio: req.bio,
        };

        let user = self
            .users
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        tracing::info!(user_id = user.id, "Profile updated");
        Ok(UserResponse::from(user))
    }
}
