// src/domain/user/entity.rs
use crate::domain::user::value_objects::{
    Email, PasswordHash, RefreshTokenHash, UserId, Username,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub refresh_token_hash: Option<RefreshTokenHash>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// `false` once the account has signed out (or never signed in).
    pub fn has_active_session(&self) -> bool {
        self.refresh_token_hash.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        username: Username,
        email: Email,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::generate(),
            username,
            email,
            password_hash,
            created_at,
        }
    }

    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            refresh_token_hash: None,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: UserId,
    pub username: Option<Username>,
    pub email: Option<Email>,
}

impl UserUpdate {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            username: None,
            email: None,
        }
    }

    pub fn with_username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}
