use crate::domain::thing::Thing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThingDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Thing> for ThingDto {
    fn from(thing: Thing) -> Self {
        Self {
            id: thing.id.into(),
            name: thing.name.into(),
            description: thing.description.map(String::from),
            created_at: thing.created_at,
        }
    }
}
