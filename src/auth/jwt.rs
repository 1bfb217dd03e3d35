//! JWT token generation and validation
//! Stateless HS256 bearer tokens carrying the caller's identity

use crate::{config::AppConfig, error::AppError, models::user::UserId};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default token lifetime: 7 days
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 7 * 24 * 3600;

/// Minimum signing key length for HS256
pub const MIN_SECRET_LEN: usize = 32;

/// The identity a token vouches for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Display name
    pub name: String,

    pub email: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl Claims {
    pub fn identity(&self) -> Result<Identity, TokenError> {
        let user_id = self.sub.parse::<UserId>().map_err(|_| TokenError::Malformed)?;
        Ok(Identity {
            user_id,
            name: self.name.clone(),
            email: self.email.clone(),
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is malformed")]
    Malformed,

    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtService {
    /// Create a service around an explicit signing secret
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by hand against an injectable clock, after the
        // signature, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let (secret, fallback) = config.security.signing_secret();

        if fallback {
            tracing::warn!(
                "No JWT signing secret configured; using the built-in development key. \
                 Tokens are forgeable by anyone with the source. Set EVENTHUB_SECURITY__JWT_SECRET."
            );
        }

        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let ttl_secs = i64::try_from(config.security.token_ttl_secs)
            .map_err(|_| AppError::Config("token_ttl_secs out of range".to_string()))?;

        Ok(Self::new(secret.as_bytes(), Duration::seconds(ttl_secs)))
    }

    /// Configured token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token with the configured lifetime
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue_at(identity, self.ttl, Utc::now())
    }

    /// Issue a token with an explicit lifetime. Negative lifetimes produce a
    /// token that is already expired.
    pub fn issue_with_ttl(&self, identity: &Identity, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(identity, ttl, Utc::now())
    }

    pub fn issue_at(
        &self,
        identity: &Identity,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expiration = now + ttl;

        let claims = Claims {
            sub: identity.user_id.to_string(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            TokenError::Encoding(e.to_string())
        })
    }

    /// Validate a token and return the identity it carries
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        self.verify_at(token, Utc::now())?.identity()
    }

    /// Validate and decode a token as of `now`.
    ///
    /// Order matters: shape, then signature, then expiry. Claims are never
    /// looked at before the signature checks out.
    ///
    /// Only the dot structure counts as shape. Any other byte that is out of
    /// place, including characters outside base64url, fails the signature.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        if !is_well_formed(token) {
            return Err(TokenError::Malformed);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(kind = ?e.kind(), "Token signature validation failed");
                TokenError::InvalidSignature
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

/// Three non-empty segments separated by dots
fn is_well_formed(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3 && segments.iter().all(|segment| !segment.is_empty())
}
