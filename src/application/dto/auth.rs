use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::user::{User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Freshly issued credentials. Never persisted; only a hash of
/// `refresh_token` survives server-side.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    /// Lifetime of the access token in seconds (`exp - iat` of its own claims).
    pub access_expires_in: i64,
    pub refresh_token: String,
    /// Absolute expiry of the refresh token (its `exp` claim).
    pub refresh_expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT payload shared by access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique per token so two tokens minted in the same second still differ.
    pub jti: String,
}

impl TokenClaims {
    pub fn subject_id(&self) -> ApplicationResult<UserId> {
        UserId::parse(&self.sub)
            .map_err(|_| ApplicationError::unauthorized("token subject is not a user id"))
    }

    pub fn expires_at(&self) -> ApplicationResult<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
            .ok_or_else(|| ApplicationError::infrastructure("token expiry out of range"))
    }
}

#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub username: String,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.to_string(),
        }
    }
}

/// Identity a guard attaches to a request after verifying its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: &TokenClaims) -> ApplicationResult<Self> {
        Ok(Self {
            id: claims.subject_id()?,
            username: claims.username.clone(),
        })
    }
}
