// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::auth::{RefreshTokensCommand, SignInCommand, SignUpCommand},
    dto::TokenPair,
};
use crate::presentation::http::cookies::{cleared_refresh_cookie, refresh_cookie};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::guards::{Authenticated, RefreshAuthenticated};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokensResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub status: String,
}

fn token_response(state: &HttpState, status: StatusCode, tokens: TokenPair) -> Response {
    let cookie = refresh_cookie(&tokens.refresh_token, tokens.refresh_expires_at);
    let body = AuthTokensResponse {
        access_token: tokens.access_token,
        expires_in: tokens.access_expires_in,
        refresh_token: state.refresh_token_in_body.then_some(tokens.refresh_token),
    };

    (status, [(header::SET_COOKIE, cookie)], Json(body)).into_response()
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created and signed in.", body = AuthTokensResponse),
        (status = 400, description = "Invalid input or user already exists.", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn sign_up(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<SignUpRequest>,
) -> HttpResult<Response> {
    let command = SignUpCommand {
        username: payload.username,
        email: payload.email,
        password: payload.password,
    };

    let tokens = state.services.auth.sign_up(command).await.into_http()?;
    Ok(token_response(&state, StatusCode::CREATED, tokens))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in.", body = AuthTokensResponse),
        (status = 401, description = "Invalid credentials.", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn sign_in(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<SignInRequest>,
) -> HttpResult<Response> {
    let command = SignInCommand {
        username: payload.username,
        password: payload.password,
    };

    let tokens = state.services.auth.sign_in(command).await.into_http()?;
    Ok(token_response(&state, StatusCode::OK, tokens))
}

#[utoipa::path(
    get,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Refresh token revoked.", body = LogoutResponse),
        (status = 401, description = "Missing or invalid access token.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
pub async fn sign_out(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Response> {
    state.services.auth.sign_out(user.id).await.into_http()?;

    let body = LogoutResponse {
        status: "logged_out".into(),
    };
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cleared_refresh_cookie())],
        Json(body),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "Token pair rotated.", body = AuthTokensResponse),
        (status = 401, description = "Missing or invalid refresh token.", body = ErrorResponse),
        (status = 403, description = "Refresh token revoked or superseded.", body = ErrorResponse),
        (status = 409, description = "Token was rotated by a concurrent request.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
pub async fn refresh(
    Extension(state): Extension<HttpState>,
    RefreshAuthenticated(identity): RefreshAuthenticated,
) -> HttpResult<Response> {
    let command = RefreshTokensCommand {
        user_id: identity.user.id,
        refresh_token: identity.refresh_token,
    };

    let tokens = state
        .services
        .auth
        .refresh_tokens(command)
        .await
        .into_http()?;
    Ok(token_response(&state, StatusCode::OK, tokens))
}
