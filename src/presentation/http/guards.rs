// src/presentation/http/guards.rs
//! Bearer/cookie token guards.
//!
//! A guard only knows where its token lives, which secret it is signed
//! with and what identity to build from the verified claims. Verification,
//! logging and caching of the identity on the request are shared by
//! [`authorize`].

use crate::application::{
    dto::{AuthenticatedUser, TokenClaims, TokenKind},
    error::{ApplicationError, ApplicationResult},
};
use crate::presentation::http::{cookies::REFRESH_COOKIE_NAME, error::HttpError, state::HttpState};
use axum::{extract::FromRequestParts, http::request::Parts};
use headers::{Authorization, Cookie, HeaderMapExt, authorization::Bearer};

pub trait TokenGuard {
    /// Used as the `guard` field of every log line this guard emits.
    const NAME: &'static str;
    const KIND: TokenKind;

    type Identity: Clone + Send + Sync + 'static;

    fn extract(parts: &Parts) -> Option<String>;

    fn attach(claims: TokenClaims, token: String) -> ApplicationResult<Self::Identity>;
}

/// Verify the request's token for guard `G` and remember the identity on the
/// request so later extractors do not verify twice.
pub fn authorize<G: TokenGuard>(parts: &mut Parts) -> Result<G::Identity, HttpError> {
    if let Some(identity) = parts.extensions.get::<G::Identity>() {
        return Ok(identity.clone());
    }

    let Some(token) = G::extract(parts) else {
        tracing::debug!(guard = G::NAME, "no token presented");
        return Err(HttpError::from_error(ApplicationError::unauthorized(
            "missing token",
        )));
    };

    let Some(state) = parts.extensions.get::<HttpState>() else {
        return Err(HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        )));
    };

    let identity = state
        .services
        .token_issuer()
        .verify(&token, G::KIND)
        .and_then(|claims| G::attach(claims, token))
        .map_err(|err| {
            tracing::warn!(guard = G::NAME, reason = %err, "token rejected");
            HttpError::from_error(err)
        })?;

    parts.extensions.insert(identity.clone());
    Ok(identity)
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_owned())
        .filter(|token| !token.is_empty())
}

/// Access tokens travel in `Authorization: Bearer`.
pub struct AccessGuard;

impl TokenGuard for AccessGuard {
    const NAME: &'static str = "access";
    const KIND: TokenKind = TokenKind::Access;

    type Identity = AuthenticatedUser;

    fn extract(parts: &Parts) -> Option<String> {
        bearer_token(parts)
    }

    fn attach(claims: TokenClaims, _token: String) -> ApplicationResult<Self::Identity> {
        AuthenticatedUser::from_claims(&claims)
    }
}

/// Verified refresh token together with the identity it names.
#[derive(Debug, Clone)]
pub struct RefreshIdentity {
    pub user: AuthenticatedUser,
    pub refresh_token: String,
}

/// Refresh tokens come from the `refresh_token` cookie, or from a bearer
/// header for clients that keep the pair themselves.
pub struct RefreshGuard;

impl TokenGuard for RefreshGuard {
    const NAME: &'static str = "refresh";
    const KIND: TokenKind = TokenKind::Refresh;

    type Identity = RefreshIdentity;

    fn extract(parts: &Parts) -> Option<String> {
        parts
            .headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(REFRESH_COOKIE_NAME).map(str::to_owned))
            .filter(|token| !token.is_empty())
            .or_else(|| bearer_token(parts))
    }

    fn attach(claims: TokenClaims, token: String) -> ApplicationResult<Self::Identity> {
        Ok(RefreshIdentity {
            user: AuthenticatedUser::from_claims(&claims)?,
            refresh_token: token,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize::<AccessGuard>(parts).map(Self)
    }
}

#[derive(Debug, Clone)]
pub struct RefreshAuthenticated(pub RefreshIdentity);

impl<S> FromRequestParts<S> for RefreshAuthenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize::<RefreshGuard>(parts).map(Self)
    }
}
