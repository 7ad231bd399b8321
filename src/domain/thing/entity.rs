// src/domain/thing/entity.rs
use crate::domain::thing::value_objects::{ThingDescription, ThingId, ThingName};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// A named item owned by exactly one user; deleted together with its owner.
#[derive(Debug, Clone)]
pub struct Thing {
    pub id: ThingId,
    pub owner_id: UserId,
    pub name: ThingName,
    pub description: Option<ThingDescription>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewThing {
    pub id: ThingId,
    pub owner_id: UserId,
    pub name: ThingName,
    pub description: Option<ThingDescription>,
    pub created_at: DateTime<Utc>,
}

impl NewThing {
    pub fn new(
        owner_id: UserId,
        name: ThingName,
        description: Option<ThingDescription>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ThingId::generate(),
            owner_id,
            name,
            description,
            created_at,
        }
    }

    pub fn into_thing(self) -> Thing {
        Thing {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

/// Partial update. `description` is `None` when untouched and `Some(None)`
/// when it should be cleared.
#[derive(Debug, Clone)]
pub struct ThingUpdate {
    pub id: ThingId,
    pub owner_id: UserId,
    pub name: Option<ThingName>,
    pub description: Option<Option<ThingDescription>>,
}

impl ThingUpdate {
    pub fn new(id: ThingId, owner_id: UserId) -> Self {
        Self {
            id,
            owner_id,
            name: None,
            description: None,
        }
    }

    pub fn with_name(mut self, name: ThingName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_description(mut self, description: ThingDescription) -> Self {
        self.description = Some(Some(description));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
