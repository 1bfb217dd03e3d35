//! Storage layer
//!
//! Services depend on the store traits only. `Pg*Repository` types back them
//! with PostgreSQL, [`MemoryStore`] backs all three in process.

pub mod event_repo;
pub mod memory;
pub mod registration_repo;
pub mod user_repo;

pub use event_repo::PgEventRepository;
pub use memory::MemoryStore;
pub use registration_repo::PgRegistrationRepository;
pub use user_repo::PgUserRepository;

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{
    event::{Event, EventChanges, EventId, NewEvent},
    registration::{NewRegistration, Registration, RegistrationId},
    user::{NewUser, User, UserChanges, UserId},
};

/// Name of the unique constraint guarding account emails
pub const USERS_EMAIL_CONSTRAINT: &str = "users_email_key";

#[derive(Debug, Error)]
pub enum StoreError {
    /// Another account already uses this email
    #[error("email already registered")]
    DuplicateEmail,

    #[error("referenced {0} does not exist")]
    MissingReference(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() && db_err.constraint() == Some(USERS_EMAIL_CONSTRAINT) {
                return StoreError::DuplicateEmail;
            }
            if db_err.is_foreign_key_violation() {
                let what = match db_err.constraint() {
                    Some("registrations_event_id_fkey") => "Event",
                    Some("registrations_user_id_fkey" | "events_organizer_id_fkey") => "User",
                    _ => "Record",
                };
                return StoreError::MissingReference(what.to_string());
            }
        }
        StoreError::Backend(err.to_string())
    }
}

/// Account storage
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::DuplicateEmail`] when the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, StoreError>;

    /// Newest date first
    async fn list(&self, public_only: bool) -> Result<Vec<Event>, StoreError>;

    async fn list_by_organizer(&self, organizer_id: UserId) -> Result<Vec<Event>, StoreError>;

    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError>;

    async fn update(&self, id: EventId, changes: EventChanges) -> Result<Option<Event>, StoreError>;

    /// Returns whether a row was removed
    async fn delete(&self, id: EventId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn find_by_id(&self, id: RegistrationId) -> Result<Option<Registration>, StoreError>;

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Registration>, StoreError>;

    async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Registration>, StoreError>;

    async fn insert(&self, registration: NewRegistration) -> Result<Registration, StoreError>;
}

/// The three stores a running service needs
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub events: Arc<dyn EventStore>,
    pub registrations: Arc<dyn RegistrationStore>,
}

impl Stores {
    /// All three backed by one in-process [`MemoryStore`]
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            events: store.clone(),
            registrations: store,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            events: Arc::new(PgEventRepository::new(pool.clone())),
            registrations: Arc::new(PgRegistrationRepository::new(pool)),
        }
    }
}
