//! User account models

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use super::validation::{normalize_email, normalize_optional, not_blank, EMAIL_REGEX};
use crate::auth::guard::OwnedResource;

/// Storage-assigned account identifier
pub type UserId = i64;

/// User account as stored. Never serialized directly: responses go through
/// [`UserResponse`] so the hash cannot leak.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("avatar", &self.avatar)
            .field("bio", &self.bio)
            .finish()
    }
}

impl OwnedResource for User {
    fn owner_id(&self) -> UserId {
        self.id
    }
}

/// Fields for a new account; the password is already hashed
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

/// Partial update; `None` leaves the column untouched
#[derive(Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

/// Public view of an account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            bio: user.bio,
        }
    }
}

/// Profile update request
#[derive(Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(regex(path = *EMAIL_REGEX, message = "must be a valid email address"))]
    pub email: Option<String>,
    pub password: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl UpdateUserRequest {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|n| n.trim().to_string()),
            email: self.email.map(|e| normalize_email(&e)),
            password: self.password,
            avatar: normalize_optional(self.avatar),
            bio: normalize_optional(self.bio),
        }
    }
}

impl fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("avatar", &self.avatar)
            .field("bio", &self.bio)
            .finish()
    }
}
