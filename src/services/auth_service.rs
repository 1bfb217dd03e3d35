//! 认证服务：注册、登录、当前用户

use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use super::{hash_password, verify_dummy, verify_password};
use crate::{
    auth::{
        jwt::{Identity, JwtService},
        password::{PasswordHasher, PasswordPolicy},
    },
    error::AppError,
    models::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        user::{NewUser, User, UserResponse},
    },
    repository::{StoreError, UserStore},
};

pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    jwt_service: Arc<JwtService>,
    policy: PasswordPolicy,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        jwt_service: Arc<JwtService>,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            users,
            hasher,
            jwt_service,
            policy,
        }
    }

    /// 用户注册
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AppError> {
        let req = req.normalized();

        // 汇总所有字段错误，包括密码策略
        let mut errors = req.validate().err().unwrap_or_else(ValidationErrors::new);
        self.policy.check("password", &req.password, &mut errors);
        if !errors.errors().is_empty() {
            return Err(AppError::Validation(errors));
        }

        if self.users.find_by_email(&req.email).await?.is_some() {
            tracing::debug!("Registration rejected: email already registered");
            metrics::counter!("auth_register_total", "outcome" => "conflict").increment(1);
            return Err(AppError::Conflict("email already registered".to_string()));
        }

        let password_hash = hash_password(&self.hasher, req.password).await?;

        // 并发注册由存储层唯一约束兜底，同样映射为 Conflict
        let user = self
            .users
            .insert(NewUser {
                name: req.name,
                email: req.email,
                password_hash,
                avatar: req.avatar,
                bio: req.bio,
            })
            .await
            .map_err(|e| {
                if matches!(e, StoreError::DuplicateEmail) {
                    metrics::counter!("auth_register_total", "outcome" => "conflict").increment(1);
                }
                AppError::from(e)
            })?;

        tracing::info!(user_id = user.id, "User registered");
        metrics::counter!("auth_register_total", "outcome" => "success").increment(1);

        self.respond_with_token(user)
    }

    /// 用户登录
    ///
    /// 邮箱不存在与密码错误返回完全相同的错误，且耗费相同的哈希计算
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AppError> {
        let req = req.normalized();
        req.validate()?;

        let Some(user) = self.users.find_by_email(&req.email).await? else {
            verify_dummy(&self.hasher, req.password).await?;
            return Err(self.login_failed());
        };

        let valid = verify_password(&self.hasher, req.password, user.password_hash.clone()).await?;
        if !valid {
            return Err(self.login_failed());
        }

        tracing::info!(user_id = user.id, "User logged in");
        metrics::counter!("auth_login_total", "outcome" => "success").increment(1);

        self.respond_with_token(user)
    }

    /// 获取当前登录用户
    pub async fn current_user(&self, identity: &Identity) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .find_by_id(identity.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok(UserResponse::from(user))
    }

    fn login_failed(&self) -> AppError {
        metrics::counter!("auth_login_total", "outcome" => "failure").increment(1);
        AppError::InvalidCredentials
    }

    fn respond_with_token(&self, user: User) -> Result<AuthResponse, AppError> {
        let identity = Identity {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        };
        let token = self.jwt_service.issue(&identity)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::password::HashCost,
        models::user::{UserChanges, UserId},
        repository::MemoryStore,
    };
    use async_trait::async_trait;
    use chrono::Duration;

    /// 查询时邮箱尚未占用，写入时被并发注册抢先
    struct LostRaceStore;

    #[async_trait]
    impl UserStore for LostRaceStore {
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
            Ok(None)
        }

        async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, StoreError> {
            Ok(None)
        }

        async fn insert(&self, _user: NewUser) -> Result<User, StoreError> {
            Err(StoreError::DuplicateEmail)
        }

        async fn update(&self, _id: UserId, _changes: UserChanges) -> Result<Option<User>, StoreError> {
            Ok(None)
        }
    }

    fn service() -> AuthService {
        service_with(Arc::new(MemoryStore::new()))
    }

    fn service_with(users: Arc<dyn UserStore>) -> AuthService {
        AuthService::new(
            users,
            Arc::new(PasswordHasher::new(HashCost::testing()).unwrap()),
            Arc::new(JwtService::new(
                b"unit-test-signing-key-0123456789abcdef",
                Duration::hours(1),
            )),
            PasswordPolicy::default(),
        )
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Jane Doe".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            avatar: None,
            bio: None,
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service();
        let registered = service.register(register_request("Jane@Example.com")).await.unwrap();
        assert_eq!(registered.user.email, "jane@example.com");

        let logged_in = service
            .login(login_request("JANE@example.com", "secret123"))
            .await
            .unwrap();
        assert_eq!(logged_in.user, registered.user);
        assert_ne!(logged_in.token, registered.token);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let service = service();
        service.register(register_request("jane@example.com")).await.unwrap();

        let err = service
            .register(register_request(" JANE@example.com "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_duplicate_rejected_by_store_conflicts() {
        let service = service_with(Arc::new(LostRaceStore));

        let err = service
            .register(register_request("jane@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_reports_password_with_other_fields() {
        let service = service();
        let req = RegisterRequest {
            name: " ".to_string(),
            email: "nope".to_string(),
            password: "short".to_string(),
            avatar: None,
            bio: None,
        };

        let err = service.register(req).await.unwrap_err();
        let fields: Vec<String> = err
            .field_violations()
            .unwrap()
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(fields, vec!["email", "name", "password"]);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let service = service();
        service.register(register_request("jane@example.com")).await.unwrap();

        let wrong_password = service
            .login(login_request("jane@example.com", "wrong-password"))
            .await
            .unwrap_err();
        let unknown_email = service
            .login(login_request("nobody@example.com", "secret123"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.user_message(), unknown_email.user_message());
    }

    #[tokio::test]
    async fn test_login_validates_before_lookup() {
        let err = service().login(login_request("", "")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_current_user_missing_account() {
        let identity = Identity {
            user_id: 404,
            name: "Ghost".to_string(),
            email: "ghost@example.com".to_string(),
        };
        let err = service().current_user(&identity).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
