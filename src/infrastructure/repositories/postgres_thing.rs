// src/infrastructure/repositories/postgres_thing.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::thing::{
    NewThing, Thing, ThingDescription, ThingId, ThingName, ThingRepository, ThingUpdate,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresThingRepository {
    pool: PgPool,
}

impl PostgresThingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ThingRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ThingRow> for Thing {
    type Error = DomainError;

    fn try_from(row: ThingRow) -> Result<Self, Self::Error> {
        Ok(Thing {
            id: ThingId::from(row.id),
            owner_id: UserId::from(row.owner_id),
            name: ThingName::new(row.name)?,
            description: row.description.map(ThingDescription::new).transpose()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ThingRepository for PostgresThingRepository {
    async fn insert(&self, new_thing: NewThing) -> DomainResult<Thing> {
        let row = sqlx::query_as::<_, ThingRow>(
            "INSERT INTO things (id, owner_id, name, description, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, owner_id, name, description, created_at",
        )
        .bind(new_thing.id.as_uuid())
        .bind(new_thing.owner_id.as_uuid())
        .bind(new_thing.name.as_str())
        .bind(new_thing.description.as_ref().map(ThingDescription::as_str))
        .bind(new_thing.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Thing::try_from(row)
    }

    async fn list_by_owner(&self, owner_id: UserId) -> DomainResult<Vec<Thing>> {
        let rows = sqlx::query_as::<_, ThingRow>(
            "SELECT id, owner_id, name, description, created_at
             FROM things WHERE owner_id = $1
             ORDER BY created_at, id",
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Thing::try_from).collect()
    }

    async fn find_by_id(&self, owner_id: UserId, id: ThingId) -> DomainResult<Option<Thing>> {
        let row = sqlx::query_as::<_, ThingRow>(
            "SELECT id, owner_id, name, description, created_at
             FROM things WHERE id = $1 AND owner_id = $2",
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Thing::try_from).transpose()
    }

    async fn update(&self, update: ThingUpdate) -> DomainResult<Thing> {
        let row = sqlx::query_as::<_, ThingRow>(
            "UPDATE things
             SET name = COALESCE($3, name),
                 description = CASE WHEN $4 THEN $5 ELSE description END
             WHERE id = $1 AND owner_id = $2
             RETURNING id, owner_id, name, description, created_at",
        )
        .bind(update.id.as_uuid())
        .bind(update.owner_id.as_uuid())
        .bind(update.name.as_ref().map(ThingName::as_str))
        .bind(update.description.is_some())
        .bind(
            update
                .description
                .as_ref()
                .and_then(|description| description.as_ref().map(ThingDescription::as_str)),
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("thing not found".into()))?;

        Thing::try_from(row)
    }

    async fn delete(&self, owner_id: UserId, id: ThingId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM things WHERE id = $1 AND owner_id = $2")
            .bind(id.as_uuid())
            .bind(owner_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}
