// tests/support/helpers.rs
use std::sync::Arc;
use std::time::Duration;

use argon2::Params;
use axum::body::{self, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use axum::{Router, response::Response};
use serde_json::Value;
use tower::util::ServiceExt as _;

use thingbox::application::ports::{
    security::{CredentialHasher, TokenIssuer},
    session::SessionStore,
    time::Clock,
};
use thingbox::application::services::ApplicationServices;
use thingbox::domain::{thing::ThingRepository, user::UserRepository};
use thingbox::infrastructure::{
    repositories::InMemoryStore,
    security::{
        password::Argon2CredentialHasher,
        session_store::AccountSessionStore,
        token::{JwtTokenIssuer, SigningConfig},
    },
    time::SystemClock,
};
use thingbox::presentation::http::{routes::build_router, state::HttpState};

pub const ACCESS_SECRET: &str = "test-access-secret";
pub const REFRESH_SECRET: &str = "test-refresh-secret";

pub fn signing_config() -> SigningConfig {
    SigningConfig {
        access_secret: ACCESS_SECRET.into(),
        access_ttl: Duration::from_secs(900),
        refresh_secret: REFRESH_SECRET.into(),
        refresh_ttl: Duration::from_secs(7 * 24 * 3600),
    }
}

/// Real Argon2id with the smallest parameters it accepts.
pub fn fast_argon2() -> Argon2CredentialHasher {
    Argon2CredentialHasher::new(Params::new(8, 1, 1, None).expect("argon2 params"))
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

pub fn build_services(
    store: &Arc<InMemoryStore>,
    hasher: Arc<dyn CredentialHasher>,
    clock: Arc<dyn Clock>,
) -> ApplicationServices {
    let user_repo: Arc<dyn UserRepository> = store.clone();
    let thing_repo: Arc<dyn ThingRepository> = store.clone();
    let issuer: Arc<dyn TokenIssuer> = Arc::new(
        JwtTokenIssuer::new(signing_config(), Arc::clone(&clock)).expect("token issuer"),
    );
    let session_store: Arc<dyn SessionStore> =
        Arc::new(AccountSessionStore::new(Arc::clone(&user_repo)));

    ApplicationServices::new(user_repo, thing_repo, hasher, issuer, session_store, clock)
}

pub fn make_test_app_with(refresh_token_in_body: bool) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let services = build_services(&store, Arc::new(fast_argon2()), Arc::new(SystemClock));
    let state = HttpState {
        services: Arc::new(services),
        refresh_token_in_body,
    };

    TestApp {
        router: build_router(state, &[]),
        store,
    }
}

pub fn make_test_app() -> TestApp {
    make_test_app_with(true)
}

pub fn json_request(method: Method, uri: &str, bearer: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

pub fn empty_request(method: Method, uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn cookie_request(uri: &str, refresh_token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::COOKIE, format!("refresh_token={refresh_token}"))
        .body(Body::empty())
        .expect("request")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("router is infallible")
}

/// Status, headers and JSON body (`Value::Null` when the body is empty).
pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let (parts, body) = send(app, request).await.into_parts();
    let bytes = body::to_bytes(body, 1024 * 1024).await.expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (parts.status, parts.headers, json)
}

pub fn set_cookie(headers: &HeaderMap) -> String {
    headers
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .expect("set-cookie header")
        .to_string()
}

/// Value of the `refresh_token` cookie set by a response.
pub fn refresh_cookie_value(headers: &HeaderMap) -> String {
    let cookie = set_cookie(headers);
    cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("refresh_token="))
        .expect("refresh_token cookie")
        .to_string()
}

#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access: String,
    pub refresh: String,
}

pub fn tokens_from(headers: &HeaderMap, body: &Value) -> IssuedTokens {
    IssuedTokens {
        access: body["accessToken"]
            .as_str()
            .expect("accessToken")
            .to_string(),
        refresh: refresh_cookie_value(headers),
    }
}

pub async fn sign_up(app: &Router, username: &str, password: &str) -> IssuedTokens {
    let (status, headers, body) = send_json(
        app,
        json_request(
            Method::POST,
            "/api/auth/signup",
            None,
            serde_json::json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": password,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "sign-up failed: {body}");
    tokens_from(&headers, &body)
}

pub async fn sign_in(app: &Router, username: &str, password: &str) -> (StatusCode, HeaderMap, Value) {
    send_json(
        app,
        json_request(
            Method::POST,
            "/api/auth/login",
            None,
            serde_json::json!({ "username": username, "password": password }),
        ),
    )
    .await
}

/// Assert a JSON error body with the given status and canonical reason.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024).await.expect("read body");
    let ct = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value = serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field");
}
