// src/presentation/http/controllers/users.rs
use crate::application::{
    commands::users::{DeleteUserCommand, UpdateUserCommand},
    dto::UserDto,
};
use crate::domain::user::UserId;
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::guards::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All accounts.", body = [UserDto]),
        (status = 401, description = "Missing or invalid access token.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
) -> HttpResult<Json<Vec<UserDto>>> {
    state
        .services
        .user_queries
        .list_users()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The account.", body = UserDto),
        (status = 404, description = "No such user.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<Uuid>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_queries
        .get_user(UserId::from(id))
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated."),
        (status = 400, description = "Invalid input or name already taken.", body = ErrorResponse),
        (status = 403, description = "Not the caller's own account.", body = ErrorResponse),
        (status = 404, description = "No such user.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> HttpResult<StatusCode> {
    let command = UpdateUserCommand {
        user_id: UserId::from(id),
        username: payload.username,
        email: payload.email,
    };

    state
        .services
        .user_commands
        .update_user(&user, command)
        .await
        .into_http()?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "Account and its things removed."),
        (status = 403, description = "Not the caller's own account.", body = ErrorResponse),
        (status = 404, description = "No such user.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<Uuid>,
) -> HttpResult<StatusCode> {
    state
        .services
        .user_commands
        .delete_user(
            &user,
            DeleteUserCommand {
                user_id: UserId::from(id),
            },
        )
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
