use axum::http::{Method, StatusCode, header};
use serde_json::json;

mod support;

use support::{
    assert_error_response, cookie_request, empty_request, json_request, make_test_app,
    make_test_app_with, refresh_cookie_value, send, send_json, set_cookie, sign_in, sign_up,
    tokens_from,
};
use thingbox::domain::user::{UserRepository, Username};

#[tokio::test]
async fn sign_up_returns_created_tokens_and_cookie() {
    let app = make_test_app();
    let (status, headers, body) = send_json(
        &app.router,
        json_request(
            Method::POST,
            "/api/auth/signup",
            None,
            json!({ "username": "alice", "email": "alice@example.com", "password": "pw-alice" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["accessToken"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["expiresIn"], json!(900));
    assert_eq!(
        body["refreshToken"].as_str(),
        Some(refresh_cookie_value(&headers).as_str())
    );

    let cookie = set_cookie(&headers);
    for attribute in [
        "HttpOnly",
        "Secure",
        "Path=/api/auth/refresh",
        "SameSite=Strict",
        "Expires=",
    ] {
        assert!(cookie.contains(attribute), "cookie lacks {attribute}: {cookie}");
    }

    let user = app
        .store
        .find_by_username(&Username::new("alice").unwrap())
        .await
        .unwrap()
        .expect("account persisted");
    assert!(user.has_active_session());
    assert!(user.password_hash.as_str().starts_with("$argon2id$"));
}

#[tokio::test]
async fn refresh_token_can_be_kept_out_of_the_body() {
    let app = make_test_app_with(false);
    let (status, headers, body) = send_json(
        &app.router,
        json_request(
            Method::POST,
            "/api/auth/signup",
            None,
            json!({ "username": "alice", "email": "alice@example.com", "password": "pw" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("refreshToken").is_none());
    assert!(!refresh_cookie_value(&headers).is_empty());
}

#[tokio::test]
async fn duplicate_sign_up_is_a_bad_request() {
    let app = make_test_app();
    sign_up(&app.router, "alice", "pw").await;

    let resp = send(
        &app.router,
        json_request(
            Method::POST,
            "/api/auth/signup",
            None,
            json!({ "username": "alice", "email": "again@example.com", "password": "pw" }),
        ),
    )
    .await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn login_succeeds_with_the_right_password() {
    let app = make_test_app();
    sign_up(&app.router, "alice", "pw-alice").await;

    let (status, headers, body) = sign_in(&app.router, "alice", "pw-alice").await;
    assert_eq!(status, StatusCode::OK);
    let tokens = tokens_from(&headers, &body);
    assert!(!tokens.access.is_empty());
    assert!(!tokens.refresh.is_empty());
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let app = make_test_app();
    sign_up(&app.router, "alice", "pw-alice").await;

    let (wrong_status, wrong_headers, wrong_body) = sign_in(&app.router, "alice", "nope").await;
    let (unknown_status, unknown_headers, unknown_body) =
        sign_in(&app.router, "nobody", "nope").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"], json!("Unauthorized"));
    assert!(wrong_headers.get(header::SET_COOKIE).is_none());
    assert!(unknown_headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn blank_username_login_is_unauthorized() {
    let app = make_test_app();
    sign_up(&app.router, "alice", "pw-alice").await;

    let (blank_status, _, blank_body) = sign_in(&app.router, "   ", "pw-alice").await;
    let (unknown_status, _, unknown_body) = sign_in(&app.router, "nobody", "pw-alice").await;

    assert_eq!(blank_status, StatusCode::UNAUTHORIZED);
    assert_eq!(blank_status, unknown_status);
    assert_eq!(blank_body, unknown_body);
}

#[tokio::test]
async fn alice_cannot_reuse_a_rotated_refresh_token() {
    let app = make_test_app();
    let original = sign_up(&app.router, "alice", "pw-alice").await;

    let (status, headers, body) =
        send_json(&app.router, cookie_request("/api/auth/refresh", &original.refresh)).await;
    assert_eq!(status, StatusCode::OK);
    let rotated = tokens_from(&headers, &body);
    assert_ne!(rotated.refresh, original.refresh);

    let resp = send(&app.router, cookie_request("/api/auth/refresh", &original.refresh)).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;

    // The rotated token still works.
    let (status, _, _) =
        send_json(&app.router, cookie_request("/api/auth/refresh", &rotated.refresh)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn refresh_accepts_a_bearer_refresh_token() {
    let app = make_test_app();
    let tokens = sign_up(&app.router, "alice", "pw-alice").await;

    let (status, _, body) = send_json(
        &app.router,
        empty_request(Method::GET, "/api/auth/refresh", Some(&tokens.refresh)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["accessToken"].is_string());
}

#[tokio::test]
async fn bob_cannot_refresh_after_logout() {
    let app = make_test_app();
    let tokens = sign_up(&app.router, "bob", "pw-bob").await;

    let (status, headers, body) = send_json(
        &app.router,
        empty_request(Method::GET, "/api/auth/logout", Some(&tokens.access)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "logged_out" }));
    let cleared = set_cookie(&headers);
    assert!(cleared.starts_with("refresh_token=;"));
    assert!(cleared.contains("Max-Age=0"));

    let user = app
        .store
        .find_by_username(&Username::new("bob").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(user.refresh_token_hash.is_none());

    let resp = send(&app.router, cookie_request("/api/auth/refresh", &tokens.refresh)).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;

    // Logging out again is harmless.
    let (status, _, _) = send_json(
        &app.router,
        empty_request(Method::GET, "/api/auth/logout", Some(&tokens.access)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn logout_requires_an_access_token() {
    let app = make_test_app();
    let tokens = sign_up(&app.router, "bob", "pw-bob").await;

    let resp = send(&app.router, empty_request(Method::GET, "/api/auth/logout", None)).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    // A refresh token is signed with the other secret and is not accepted here.
    let resp = send(
        &app.router,
        empty_request(Method::GET, "/api/auth/logout", Some(&tokens.refresh)),
    )
    .await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn refresh_rejects_missing_and_forged_tokens() {
    let app = make_test_app();
    let tokens = sign_up(&app.router, "alice", "pw-alice").await;

    let resp = send(&app.router, empty_request(Method::GET, "/api/auth/refresh", None)).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    let resp = send(&app.router, cookie_request("/api/auth/refresh", "garbage")).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    // Access tokens do not pass the refresh guard.
    let resp = send(&app.router, cookie_request("/api/auth/refresh", &tokens.access)).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn health_and_docs_are_public() {
    let app = make_test_app();

    let (status, _, body) = send_json(&app.router, empty_request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, _, body) =
        send_json(&app.router, empty_request(Method::GET, "/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/auth/refresh"].is_object());
}
