//! Registration repository (数据库访问层)

use async_trait::async_trait;
use sqlx::PgPool;

use super::{RegistrationStore, StoreError};
use crate::models::{
    event::EventId,
    registration::{NewRegistration, Registration, RegistrationId},
    user::UserId,
};

const REGISTRATION_COLUMNS: &str =
    "id, event_id, user_id, full_name, email, ticket_type, registration_date";

pub struct PgRegistrationRepository {
    db: PgPool,
}

impl PgRegistrationRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationStore for PgRegistrationRepository {
    async fn find_by_id(&self, id: RegistrationId) -> Result<Option<Registration>, StoreError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(registration)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Registration>, StoreError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE user_id = $1 ORDER BY registration_date DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(registrations)
    }

    async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Registration>, StoreError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 ORDER BY registration_date DESC, id DESC"
        ))
        .bind(event_id)
        .fetch_all(&self.db)
        .await?;

        Ok(registrations)
    }

    /// 外键冲突（活动不存在）映射为 MissingReference
    async fn insert(&self, registration: NewRegistration) -> Result<Registration, StoreError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            INSERT INTO registrations (event_id, user_id, full_name, email, ticket_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration.event_id)
        .bind(registration.user_id)
        .bind(&registration.full_name)
        .bind(&registration.email)
        .bind(&registration.ticket_type)
        .fetch_one(&self.db)
        .await?;

        Ok(registration)
    }
}
