//! Authentication and authorization module

pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use guard::{authorize, authorize_owner, OwnedResource};
pub use jwt::{Claims, Identity, JwtService, TokenError};
pub use middleware::{extract_token, jwt_auth_middleware};
pub use password::{HashCost, HashError, PasswordHasher, PasswordPolicy};
