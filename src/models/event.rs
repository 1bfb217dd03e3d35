//! Event models

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserId;
use super::validation::not_blank;
use crate::auth::guard::OwnedResource;

pub type EventId = i64;

/// Published event; `organizer_id` is fixed at creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: String,
    pub location: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub organizer_id: UserId,
    pub is_public: bool,
}

impl OwnedResource for Event {
    fn owner_id(&self) -> UserId {
        self.organizer_id
    }
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub date: String,
    pub location: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub organizer_id: UserId,
    pub is_public: bool,
}

/// Partial update; the organizer cannot change
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventChanges {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub date: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub location: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub price: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub category: Option<String>,
    pub is_public: Option<bool>,
}

impl EventChanges {
    /// Trim the same fields creation trims
    pub fn normalized(self) -> Self {
        let trim = |value: Option<String>| value.map(|v| v.trim().to_string());
        Self {
            title: trim(self.title),
            date: trim(self.date),
            location: trim(self.location),
            description: self.description,
            price: trim(self.price),
            image: trim(self.image),
            category: trim(self.category),
            is_public: self.is_public,
        }
    }
}

/// Create event request; the organizer comes from the caller's token
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub date: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub location: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub price: String,
    #[serde(default)]
    #[validate(url(message = "must be a valid URL"))]
    pub image: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub category: String,
    pub is_public: Option<bool>,
}

impl CreateEventRequest {
    pub fn into_new_event(self, organizer_id: UserId) -> NewEvent {
        NewEvent {
            title: self.title.trim().to_string(),
            date: self.date.trim().to_string(),
            location: self.location.trim().to_string(),
            description: self.description,
            price: self.price.trim().to_string(),
            image: self.image.trim().to_string(),
            category: self.category.trim().to_string(),
            organizer_id,
            is_public: self.is_public.unwrap_or(true),
        }
    }
}

/// Query string for event listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListQuery {
    pub public_only: Option<bool>,
}
