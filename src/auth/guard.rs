//! Ownership authorization
//!
//! A protected mutation on an owned resource is allowed only when the
//! authenticated identity is the resource's owner. Pure comparison, no I/O.

use crate::{auth::jwt::Identity, error::AppError, models::user::UserId};

/// A resource with a single owning account
pub trait OwnedResource {
    fn owner_id(&self) -> UserId;
}

pub fn authorize(identity: &Identity, owner_id: UserId) -> Result<(), AppError> {
    if identity.user_id == owner_id {
        Ok(())
    } else {
        tracing::warn!(
            user_id = identity.user_id,
            owner_id,
            "Ownership check failed"
        );
        Err(AppError::Forbidden)
    }
}

pub fn authorize_owner<R: OwnedResource + ?Sized>(
    identity: &Identity,
    resource: &R,
) -> Result<(), AppError> {
    authorize(identity, resource.owner_id())
}
