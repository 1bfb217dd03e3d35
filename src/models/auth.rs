//! Authentication-related models

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use super::user::UserResponse;
use super::validation::{normalize_email, normalize_optional, not_blank, EMAIL_REGEX};

/// Registration request
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation alongside every other violation instead of failing JSON parsing.
#[derive(Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(regex(path = *EMAIL_REGEX, message = "must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[validate(url(message = "must be a valid URL"))]
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl RegisterRequest {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
            avatar: normalize_optional(self.avatar),
            bio: normalize_optional(self.bio),
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("avatar", &self.avatar)
            .field("bio", &self.bio)
            .finish()
    }
}

/// Login request
#[derive(Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(regex(path = *EMAIL_REGEX, message = "must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            password: self.password,
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Register / login response
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}
