//! 活动报名服务

use std::sync::Arc;
use validator::Validate;

use crate::{
    auth::{
        guard::{authorize, authorize_owner},
        jwt::Identity,
    },
    error::AppError,
    models::{
        event::EventId,
        registration::{CreateRegistrationRequest, Registration, RegistrationId},
        user::UserId,
    },
    repository::{EventStore, RegistrationStore},
};

pub struct RegistrationService {
    registrations: Arc<dyn RegistrationStore>,
    events: Arc<dyn EventStore>,
}

impl RegistrationService {
    pub fn new(registrations: Arc<dyn RegistrationStore>, events: Arc<dyn EventStore>) -> Self {
        Self {
            registrations,
            events,
        }
    }

    /// 报名活动，报名人固定为当前用户
    pub async fn create(
        &self,
        identity: &Identity,
        req: CreateRegistrationRequest,
    ) -> Result<Registration, AppError> {
        req.validate()?;

        if self.events.find_by_id(req.event_id).await?.is_none() {
            return Err(AppError::not_found("Event"));
        }

        let registration = self
            .registrations
            .insert(req.into_new_registration(identity.user_id))
            .await?;

        tracing::info!(
            registration_id = registration.id,
            event_id = registration.event_id,
            user_id = registration.user_id,
            "Registration created"
        );
        Ok(registration)
    }

    /// 报名人本人或活动组织者可查看
    pub async fn get(&self, identity: &Identity, id: RegistrationId) -> Result<Registration, AppError> {
        let registration = self
            .registrations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Registration"))?;

        if registration.user_id != identity.user_id {
            match self.events.find_by_id(registration.event_id).await? {
                Some(event) => authorize_owner(identity, &event)?,
                None => authorize(identity, registration.user_id)?,
            }
        }
        Ok(registration)
    }

    /// 仅本人可查看自己的报名
    pub async fn list_by_user(
        &self,
        identity: &Identity,
        user_id: UserId,
    ) -> Result<Vec<Registration>, AppError> {
        authorize(identity, user_id)?;
        Ok(self.registrations.list_by_user(user_id).await?)
    }

    /// 仅活动组织者可查看报名名单
    pub async fn list_by_event(
        &self,
        identity: &Identity,
        event_id: EventId,
    ) -> Result<Vec<Registration>, AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event"))?;
        authorize_owner(identity, &event)?;

        Ok(self.registrations.list_by_event(event_id).await?)
    }
}
