//! Event repository (数据库访问层)

use async_trait::async_trait;
use sqlx::PgPool;

use super::{EventStore, StoreError};
use crate::models::{
    event::{Event, EventChanges, EventId, NewEvent},
    user::UserId,
};

const EVENT_COLUMNS: &str =
    "id, title, date, location, description, price, image, category, organizer_id, is_public";

pub struct PgEventRepository {
    db: PgPool,
}

impl PgEventRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventStore for PgEventRepository {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(event)
    }

    async fn list(&self, public_only: bool) -> Result<Vec<Event>, StoreError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE ($1 = FALSE OR is_public) ORDER BY date DESC, id DESC"
        ))
        .bind(public_only)
        .fetch_all(&self.db)
        .await?;

        Ok(events)
    }

    async fn list_by_organizer(&self, organizer_id: UserId) -> Result<Vec<Event>, StoreError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE organizer_id = $1 ORDER BY date DESC, id DESC"
        ))
        .bind(organizer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(events)
    }

    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (title, date, location, description, price, image, category, organizer_id, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&event.title)
        .bind(&event.date)
        .bind(&event.location)
        .bind(&event.description)
        .bind(&event.price)
        .bind(&event.image)
        .bind(&event.category)
        .bind(event.organizer_id)
        .bind(event.is_public)
        .fetch_one(&self.db)
        .await?;

        Ok(event)
    }

    async fn update(&self, id: EventId, changes: EventChanges) -> Result<Option<Event>, StoreError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET
                title = COALESCE($2, title),
                date = COALESCE($3, date),
                location = COALESCE($4, location),
                description = COALESCE($5, description),
                price = COALESCE($6, price),
                image = COALESCE($7, image),
                category = COALESCE($8, category),
                is_public = COALESCE($9, is_public)
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.date)
        .bind(&changes.location)
        .bind(&changes.description)
        .bind(&changes.price)
        .bind(&changes.image)
        .bind(&changes.category)
        .bind(changes.is_public)
        .fetch_optional(&self.db)
        .await?;

        Ok(event)
    }

    async fn delete(&self, id: EventId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
