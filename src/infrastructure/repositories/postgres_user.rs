// src/infrastructure/repositories/postgres_user.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    Email, NewUser, PasswordHash, RefreshTokenHash, User, UserId, UserRepository, UserUpdate,
    Username,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, username, email, hashed_password, hashed_refresh_token, created_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    hashed_password: String,
    hashed_refresh_token: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from(row.id),
            username: Username::new(row.username)?,
            email: Email::new(row.email)?,
            password_hash: PasswordHash::new(row.hashed_password)?,
            refresh_token_hash: row
                .hashed_refresh_token
                .map(RefreshTokenHash::new)
                .transpose()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let NewUser {
            id,
            username,
            email,
            password_hash,
            created_at,
        } = new_user;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (id, username, email, hashed_password, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(username.as_str())
        .bind(email.as_str())
        .bind(password_hash.as_str())
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users
             SET username = COALESCE($2, username),
                 email = COALESCE($3, email)
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(update.id.as_uuid())
        .bind(update.username.as_ref().map(Username::as_str))
        .bind(update.email.as_ref().map(Email::as_str))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("user not found".into()))?;

        User::try_from(row)
    }

    async fn delete(&self, id: UserId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_refresh_token_hash(
        &self,
        id: UserId,
        hash: Option<RefreshTokenHash>,
    ) -> DomainResult<()> {
        sqlx::query("UPDATE users SET hashed_refresh_token = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(hash.as_ref().map(RefreshTokenHash::as_str))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(())
    }

    async fn compare_and_swap_refresh_token_hash(
        &self,
        id: UserId,
        expected: &RefreshTokenHash,
        replacement: RefreshTokenHash,
    ) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET hashed_refresh_token = $3
             WHERE id = $1 AND hashed_refresh_token = $2",
        )
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .bind(replacement.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected() == 1)
    }
}
