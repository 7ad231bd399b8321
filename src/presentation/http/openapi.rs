// src/presentation/http/openapi.rs
use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::sign_up,
        crate::presentation::http::controllers::auth::sign_in,
        crate::presentation::http::controllers::auth::sign_out,
        crate::presentation::http::controllers::auth::refresh,
        crate::presentation::http::controllers::users::list_users,
        crate::presentation::http::controllers::users::get_user,
        crate::presentation::http::controllers::users::update_user,
        crate::presentation::http::controllers::users::delete_user,
        crate::presentation::http::controllers::things::create_thing,
        crate::presentation::http::controllers::things::list_things,
        crate::presentation::http::controllers::things::get_thing,
        crate::presentation::http::controllers::things::update_thing,
        crate::presentation::http::controllers::things::delete_thing,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::SignUpRequest,
            crate::presentation::http::controllers::auth::SignInRequest,
            crate::presentation::http::controllers::auth::AuthTokensResponse,
            crate::presentation::http::controllers::auth::LogoutResponse,
            crate::presentation::http::controllers::users::UpdateUserRequest,
            crate::presentation::http::controllers::things::CreateThingRequest,
            crate::presentation::http::controllers::things::UpdateThingRequest,
            crate::application::dto::UserDto,
            crate::application::dto::ThingDto
        )
    ),
    tags(
        (name = "Auth", description = "Sign-up, sign-in, sign-out and token rotation"),
        (name = "Users", description = "Account endpoints"),
        (name = "Things", description = "Endpoints for the caller's things"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Thingbox API",
        description = "Users and their things behind JWT authentication",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("JWT".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    Router::new()
        .route("/openapi.json", get(serve_openapi))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
}
