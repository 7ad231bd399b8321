use axum::http::{Method, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

mod support;

use support::{
    IssuedTokens, assert_error_response, empty_request, json_request, make_test_app, send,
    send_json, sign_up,
};

async fn create(app: &axum::Router, owner: &IssuedTokens, body: Value) -> (StatusCode, Value) {
    let (status, _, body) = send_json(
        app,
        json_request(Method::POST, "/api/things", Some(&owner.access), body),
    )
    .await;
    (status, body)
}

#[tokio::test]
async fn things_are_created_listed_and_fetched() {
    let app = make_test_app();
    let alice = sign_up(&app.router, "alice", "pw").await;

    let (status, lamp) = create(
        &app.router,
        &alice,
        json!({ "name": "lamp", "description": "desk lamp" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(lamp["name"], json!("lamp"));
    assert_eq!(lamp["description"], json!("desk lamp"));

    let (status, chair) = create(&app.router, &alice, json!({ "name": "chair" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(chair.get("description").is_none());

    let (status, _, list) = send_json(
        &app.router,
        empty_request(Method::GET, "/api/things", Some(&alice.access)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(2));

    let id = lamp["id"].as_str().unwrap();
    let (status, _, fetched) = send_json(
        &app.router,
        empty_request(Method::GET, &format!("/api/things/{id}"), Some(&alice.access)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, lamp);
}

#[tokio::test]
async fn invalid_or_duplicate_names_are_rejected() {
    let app = make_test_app();
    let alice = sign_up(&app.router, "alice", "pw").await;
    create(&app.router, &alice, json!({ "name": "lamp" })).await;

    for body in [json!({ "name": "lamp" }), json!({ "name": "  " })] {
        let resp = send(
            &app.router,
            json_request(Method::POST, "/api/things", Some(&alice.access), body),
        )
        .await;
        assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
    }
}

#[tokio::test]
async fn things_of_other_users_are_invisible() {
    let app = make_test_app();
    let alice = sign_up(&app.router, "alice", "pw").await;
    let bob = sign_up(&app.router, "bob", "pw").await;

    let (_, lamp) = create(&app.router, &alice, json!({ "name": "lamp" })).await;
    let uri = format!("/api/things/{}", lamp["id"].as_str().unwrap());

    let (_, _, list) = send_json(
        &app.router,
        empty_request(Method::GET, "/api/things", Some(&bob.access)),
    )
    .await;
    assert_eq!(list, json!([]));

    let resp = send(&app.router, empty_request(Method::GET, &uri, Some(&bob.access))).await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = send(
        &app.router,
        json_request(Method::PATCH, &uri, Some(&bob.access), json!({ "name": "mine" })),
    )
    .await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = send(&app.router, empty_request(Method::DELETE, &uri, Some(&bob.access))).await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    // Bob may reuse the name; uniqueness is per owner.
    let (status, _) = create(&app.router, &bob, json!({ "name": "lamp" })).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn things_can_be_updated_and_deleted() {
    let app = make_test_app();
    let alice = sign_up(&app.router, "alice", "pw").await;
    let (_, lamp) = create(&app.router, &alice, json!({ "name": "lamp" })).await;
    let uri = format!("/api/things/{}", lamp["id"].as_str().unwrap());

    let (status, _, _) = send_json(
        &app.router,
        json_request(
            Method::PATCH,
            &uri,
            Some(&alice.access),
            json!({ "name": "floor lamp", "description": "tall" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, fetched) =
        send_json(&app.router, empty_request(Method::GET, &uri, Some(&alice.access))).await;
    assert_eq!(fetched["name"], json!("floor lamp"));
    assert_eq!(fetched["description"], json!("tall"));

    let resp = send(
        &app.router,
        json_request(Method::PATCH, &uri, Some(&alice.access), json!({})),
    )
    .await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;

    let (status, _, _) =
        send_json(&app.router, empty_request(Method::DELETE, &uri, Some(&alice.access))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let resp = send(&app.router, empty_request(Method::GET, &uri, Some(&alice.access))).await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = send(
        &app.router,
        empty_request(
            Method::DELETE,
            &format!("/api/things/{}", Uuid::new_v4()),
            Some(&alice.access),
        ),
    )
    .await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn null_description_removes_it_and_absent_keeps_it() {
    let app = make_test_app();
    let alice = sign_up(&app.router, "alice", "pw").await;
    let (_, lamp) = create(
        &app.router,
        &alice,
        json!({ "name": "lamp", "description": "desk" }),
    )
    .await;
    let uri = format!("/api/things/{}", lamp["id"].as_str().unwrap());

    let (status, _, body) = send_json(
        &app.router,
        json_request(Method::PATCH, &uri, Some(&alice.access), json!({ "name": "desk lamp" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
    let (_, _, fetched) =
        send_json(&app.router, empty_request(Method::GET, &uri, Some(&alice.access))).await;
    assert_eq!(fetched["description"], json!("desk"));

    let (status, _, _) = send_json(
        &app.router,
        json_request(Method::PATCH, &uri, Some(&alice.access), json!({ "description": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, _, fetched) =
        send_json(&app.router, empty_request(Method::GET, &uri, Some(&alice.access))).await;
    assert_eq!(fetched["name"], json!("desk lamp"));
    assert!(fetched.get("description").is_none());
}

#[tokio::test]
async fn deleting_the_owner_removes_their_things() {
    let app = make_test_app();
    let alice = sign_up(&app.router, "alice", "pw").await;
    create(&app.router, &alice, json!({ "name": "lamp" })).await;

    let (_, _, users) = send_json(
        &app.router,
        empty_request(Method::GET, "/api/users", Some(&alice.access)),
    )
    .await;
    let alice_id = users[0]["id"].as_str().unwrap().to_string();

    let (status, _, _) = send_json(
        &app.router,
        empty_request(Method::DELETE, &format!("/api/users/{alice_id}"), Some(&alice.access)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The access token outlives the account; the listing is simply empty.
    let (status, _, list) = send_json(
        &app.router,
        empty_request(Method::GET, "/api/things", Some(&alice.access)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}
