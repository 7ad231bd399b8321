// src/domain/thing/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThingId(Uuid);

impl ThingId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ThingId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<ThingId> for Uuid {
    fn from(value: ThingId) -> Self {
        value.0
    }
}

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThingName(String);

impl ThingName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::Validation("thing name cannot be empty".into()));
        }
        if value.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "thing name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ThingName> for String {
    fn from(value: ThingName) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThingDescription(String);

impl ThingDescription {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::Validation(format!(
                "thing description must be at most {MAX_DESCRIPTION_LEN} characters"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ThingDescription> for String {
    fn from(value: ThingDescription) -> Self {
        value.0
    }
}
