// src/presentation/http/controllers/things.rs
use crate::application::{
    commands::things::{CreateThingCommand, UpdateThingCommand},
    dto::ThingDto,
};
use crate::domain::thing::ThingId;
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::guards::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateThingRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateThingRequest {
    pub name: Option<String>,
    /// Omit to keep the description, send `null` to remove it.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

/// Keeps an explicit `null` apart from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[utoipa::path(
    post,
    path = "/api/things",
    request_body = CreateThingRequest,
    responses(
        (status = 201, description = "Thing created.", body = ThingDto),
        (status = 400, description = "Invalid input or duplicate name.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Things"
)]
pub async fn create_thing(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateThingRequest>,
) -> HttpResult<(StatusCode, Json<ThingDto>)> {
    let command = CreateThingCommand {
        name: payload.name,
        description: payload.description,
    };

    let thing = state
        .services
        .thing_commands
        .create_thing(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(thing)))
}

#[utoipa::path(
    get,
    path = "/api/things",
    responses(
        (status = 200, description = "The caller's things.", body = [ThingDto])
    ),
    security(("bearerAuth" = [])),
    tag = "Things"
)]
pub async fn list_things(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<ThingDto>>> {
    state
        .services
        .thing_queries
        .list_things(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/things/{id}",
    params(("id" = Uuid, Path, description = "Thing id")),
    responses(
        (status = 200, description = "The thing.", body = ThingDto),
        (status = 404, description = "Missing or owned by someone else.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Things"
)]
pub async fn get_thing(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<Uuid>,
) -> HttpResult<Json<ThingDto>> {
    state
        .services
        .thing_queries
        .get_thing(&user, ThingId::from(id))
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/things/{id}",
    params(("id" = Uuid, Path, description = "Thing id")),
    request_body = UpdateThingRequest,
    responses(
        (status = 200, description = "Thing updated."),
        (status = 400, description = "Invalid input or duplicate name.", body = ErrorResponse),
        (status = 404, description = "Missing or owned by someone else.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Things"
)]
pub async fn update_thing(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateThingRequest>,
) -> HttpResult<StatusCode> {
    let command = UpdateThingCommand {
        id: ThingId::from(id),
        name: payload.name,
        description: payload.description,
    };

    state
        .services
        .thing_commands
        .update_thing(&user, command)
        .await
        .into_http()?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/api/things/{id}",
    params(("id" = Uuid, Path, description = "Thing id")),
    responses(
        (status = 204, description = "Thing removed."),
        (status = 404, description = "Missing or owned by someone else.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Things"
)]
pub async fn delete_thing(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<Uuid>,
) -> HttpResult<StatusCode> {
    state
        .services
        .thing_commands
        .delete_thing(&user, ThingId::from(id))
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
