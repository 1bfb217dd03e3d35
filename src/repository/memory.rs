//! In-process storage
//!
//! Backs every store trait with maps behind one lock. Used when no database
//! URL is configured and by the test suites. Enforces the same constraints as
//! the PostgreSQL schema: unique account email and existing foreign keys.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{EventStore, RegistrationStore, StoreError, UserStore};
use crate::models::{
    event::{Event, EventChanges, EventId, NewEvent},
    registration::{NewRegistration, Registration, RegistrationId},
    user::{NewUser, User, UserChanges, UserId},
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    events: BTreeMap<EventId, Event>,
    registrations: BTreeMap<RegistrationId, Registration>,
    next_user_id: i64,
    next_event_id: i64,
    next_registration_id: i64,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

fn newest_first<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(StoreError::DuplicateEmail);
        }

        let id = next_id(&mut tables.next_user_id);
        let user = User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            avatar: user.avatar,
            bio: user.bio,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email {
            if tables.email_taken(email, Some(id)) {
                return Err(StoreError::DuplicateEmail);
            }
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(avatar) = changes.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(bio) = changes.bio {
            user.bio = Some(bio);
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn list(&self, public_only: bool) -> Result<Vec<Event>, StoreError> {
        let tables = self.tables.read().await;
        let rows = tables
            .events
            .values()
            .filter(|e| !public_only || e.is_public)
            .cloned()
            .collect();
        Ok(newest_first(rows, |e: &Event| (e.date.clone(), e.id)))
    }

    async fn list_by_organizer(&self, organizer_id: UserId) -> Result<Vec<Event>, StoreError> {
        let tables = self.tables.read().await;
        let rows = tables
            .events
            .values()
            .filter(|e| e.organizer_id == organizer_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |e: &Event| (e.date.clone(), e.id)))
    }

    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&event.organizer_id) {
            return Err(StoreError::MissingReference("User".to_string()));
        }

        let id = next_id(&mut tables.next_event_id);
        let event = Event {
            id,
            title: event.title,
            date: event.date,
            location: event.location,
            description: event.description,
            price: event.price,
            image: event.image,
            category: event.category,
            organizer_id: event.organizer_id,
            is_public: event.is_public,
        };
        tables.events.insert(id, event.clone());
        Ok(event)
    }

    async fn update(&self, id: EventId, changes: EventChanges) -> Result<Option<Event>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(event) = tables.events.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            event.title = title;
        }
        if let Some(date) = changes.date {
            event.date = date;
        }
        if let Some(location) = changes.location {
            event.location = location;
        }
        if let Some(description) = changes.description {
            event.description = description;
        }
        if let Some(price) = changes.price {
            event.price = price;
        }
        if let Some(image) = changes.image {
            event.image = image;
        }
        if let Some(category) = changes.category {
            event.category = category;
        }
        if let Some(is_public) = changes.is_public {
            event.is_public = is_public;
        }
        Ok(Some(event.clone()))
    }

    async fn delete(&self, id: EventId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let removed = tables.events.remove(&id).is_some();
        if removed {
            tables.registrations.retain(|_, r| r.event_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn find_by_id(&self, id: RegistrationId) -> Result<Option<Registration>, StoreError> {
        Ok(self.tables.read().await.registrations.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Registration>, StoreError> {
        let tables = self.tables.read().await;
        let rows = tables
            .registrations
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &Registration| (r.registration_date, r.id)))
    }

    async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Registration>, StoreError> {
        let tables = self.tables.read().await;
        let rows = tables
            .registrations
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &Registration| (r.registration_date, r.id)))
    }

    async fn insert(&self, registration: NewRegistration) -> Result<Registration, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&registration.event_id) {
            return Err(StoreError::MissingReference("Event".to_string()));
        }
        if !tables.users.contains_key(&registration.user_id) {
            return Err(StoreError::MissingReference("User".to_string()));
        }

        let id = next_id(&mut tables.next_registration_id);
        let registration = Registration {
            id,
            event_id: registration.event_id,
            user_id: registration.user_id,
            full_name: registration.full_name,
            email: registration.email,
            ticket_type: registration.ticket_type,
            registration_date: Utc::now(),
        };
        tables.registrations.insert(id, registration.clone());
        Ok(registration)
    }
}
