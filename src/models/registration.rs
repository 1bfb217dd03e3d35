//! Event registration models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::event::EventId;
use super::user::UserId;
use super::validation::{normalize_email, not_blank, EMAIL_REGEX};

pub type RegistrationId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    pub ticket_type: String,
    pub registration_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub event_id: EventId,
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    pub ticket_type: String,
}

/// Create registration request; the attendee is always the caller
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "must be a valid event id"))]
    pub event_id: EventId,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,
    #[serde(default)]
    #[validate(regex(path = *EMAIL_REGEX, message = "must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub ticket_type: String,
}

impl CreateRegistrationRequest {
    pub fn into_new_registration(self, user_id: UserId) -> NewRegistration {
        NewRegistration {
            event_id: self.event_id,
            user_id,
            full_name: self.full_name.trim().to_string(),
            email: normalize_email(&self.email),
            ticket_type: self.ticket_type.trim().to_string(),
        }
    }
}
