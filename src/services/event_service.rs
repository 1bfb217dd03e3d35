//! 活动服务：查询、创建、修改、删除

use std::sync::Arc;
use validator::Validate;

use crate::{
    auth::{guard::authorize_owner, jwt::Identity},
    error::AppError,
    models::{
        event::{CreateEventRequest, Event, EventChanges, EventId},
        user::UserId,
    },
    repository::EventStore,
};

pub struct EventService {
    events: Arc<dyn EventStore>,
}

impl EventService {
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    pub async fn list(&self, public_only: bool) -> Result<Vec<Event>, AppError> {
        Ok(self.events.list(public_only).await?)
    }

    pub async fn get(&self, id: EventId) -> Result<Event, AppError> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event"))
    }

    pub async fn list_by_organizer(&self, organizer_id: UserId) -> Result<Vec<Event>, AppError> {
        Ok(self.events.list_by_organizer(organizer_id).await?)
    }

    /// 创建活动，组织者固定为当前用户
    pub async fn create(&self, identity: &Identity, req: CreateEventRequest) -> Result<Event, AppError> {
        req.validate()?;

        let event = self.events.insert(req.into_new_event(identity.user_id)).await?;

        tracing::info!(event_id = event.id, organizer_id = event.organizer_id, "Event created");
        Ok(event)
    }

    /// 修改活动，仅组织者可操作
    pub async fn update(
        &self,
        identity: &Identity,
        id: EventId,
        changes: EventChanges,
    ) -> Result<Event, AppError> {
        let existing = self.get(id).await?;
        authorize_owner(identity, &existing)?;
        let changes = changes.normalized();
        changes.validate()?;

        let event = self
            .events
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("Event"))?;

        tracing::info!(event_id = event.id, "Event updated");
        Ok(event)
    }

    /// 删除活动，仅组织者可操作；报名记录随之删除
    pub async fn delete(&self, identity: &Identity, id: EventId) -> Result<(), AppError> {
        let existing = self.get(id).await?;
        authorize_owner(identity, &existing)?;

        if !self.events.delete(id).await? {
            return Err(AppError::not_found("Event"));
        }

        tracing::info!(event_id = id, "Event deleted");
        Ok(())
    }
}
