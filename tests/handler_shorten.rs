mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use shortlink::domain::store::Store;
use shortlink::infrastructure::persistence::InMemoryStore;
use std::sync::Arc;

#[tokio::test]
async fn test_shorten_with_generated_code() {
    let store = Arc::new(InMemoryStore::new());
    let user_id = common::create_test_user(&store, "ann@example.com").await;
    let (server, _rx) = common::create_test_server(store.clone());

    let response = server
        .post(&format!("/users/{user_id}/shorten"))
        .json(&json!({ "url": "https://example.com/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let code = body["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert_eq!(body["short_url"], format!("{}/{code}", common::BASE_URL));
    assert_eq!(body["original_url"], "https://example.com/page");
    assert_eq!(body["clicks"], 0);

    let stored = store.get_by_short_code(code).await.unwrap();
    assert_eq!(stored.user_id, user_id);
}

#[tokio::test]
async fn test_shorten_with_custom_code() {
    let store = Arc::new(InMemoryStore::new());
    let user_id = common::create_test_user(&store, "ann@example.com").await;
    let (server, _rx) = common::create_test_server(store);

    let response = server
        .post(&format!("/users/{user_id}/shorten"))
        .json(&json!({ "url": "https://example.com", "short_code": "my-link" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["short_code"], "my-link");
    assert_eq!(body["short_url"], "https://s.example.com/my-link");
}

#[tokio::test]
async fn test_shorten_same_request_is_idempotent() {
    let store = Arc::new(InMemoryStore::new());
    let user_id = common::create_test_user(&store, "ann@example.com").await;
    let (server, _rx) = common::create_test_server(store.clone());
    let payload = json!({ "url": "https://example.com", "short_code": "again" });

    let first = server
        .post(&format!("/users/{user_id}/shorten"))
        .json(&payload)
        .await;
    let second = server
        .post(&format!("/users/{user_id}/shorten"))
        .json(&payload)
        .await;

    first.assert_status(StatusCode::CREATED);
    second.assert_status(StatusCode::CREATED);
    assert_eq!(second.json::<Value>()["short_code"], "again");
    assert_eq!(store.get_links_by_user_id(user_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_shorten_url_already_shortened_reports_existing_code() {
    let store = Arc::new(InMemoryStore::new());
    let user_id = common::create_test_user(&store, "ann@example.com").await;
    common::create_test_link(&store, user_id, "orig01", "https://example.com").await;
    let (server, _rx) = common::create_test_server(store);

    let response = server
        .post(&format!("/users/{user_id}/shorten"))
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["details"]["existing_code"], "orig01");

    let response = server
        .post(&format!("/users/{user_id}/shorten"))
        .json(&json!({ "url": "https://example.com", "short_code": "other" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["details"]["existing_code"], "orig01");
}

#[tokio::test]
async fn test_shorten_same_url_for_different_users() {
    let store = Arc::new(InMemoryStore::new());
    let ann = common::create_test_user(&store, "ann@example.com").await;
    let bob = common::create_test_user(&store, "bob@example.com").await;
    common::create_test_link(&store, ann, "annurl", "https://example.com").await;
    let (server, _rx) = common::create_test_server(store);

    let response = server
        .post(&format!("/users/{bob}/shorten"))
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_ne!(response.json::<Value>()["short_code"], "annurl");
}

#[tokio::test]
async fn test_shorten_code_taken_by_another_user() {
    let store = Arc::new(InMemoryStore::new());
    let ann = common::create_test_user(&store, "ann@example.com").await;
    let bob = common::create_test_user(&store, "bob@example.com").await;
    common::create_test_link(&store, ann, "taken", "https://example.com/a").await;
    let (server, _rx) = common::create_test_server(store);

    let response = server
        .post(&format!("/users/{bob}/shorten"))
        .json(&json!({ "url": "https://example.com/b", "short_code": "taken" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Short code already exists");
}

#[tokio::test]
async fn test_shorten_invalid_code() {
    let store = Arc::new(InMemoryStore::new());
    let user_id = common::create_test_user(&store, "ann@example.com").await;
    let (server, _rx) = common::create_test_server(store);

    for code in ["ab", "has space", "emoji🙂"] {
        let response = server
            .post(&format!("/users/{user_id}/shorten"))
            .json(&json!({ "url": "https://example.com", "short_code": code }))
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let store = Arc::new(InMemoryStore::new());
    let user_id = common::create_test_user(&store, "ann@example.com").await;
    let (server, _rx) = common::create_test_server(store);

    for url in ["", "not a url", "/relative/path"] {
        let response = server
            .post(&format!("/users/{user_id}/shorten"))
            .json(&json!({ "url": url }))
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_shorten_unknown_user() {
    let store = Arc::new(InMemoryStore::new());
    let (server, _rx) = common::create_test_server(store);

    let response = server
        .post("/users/42/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "User not found");
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let store = Arc::new(InMemoryStore::new());
    let user_id = common::create_test_user(&store, "ann@example.com").await;
    let (server, _rx) = common::create_test_server(store);

    let response = server
        .post(&format!("/users/{user_id}/shorten"))
        .json(&json!({ "short_code": "abc" }))
        .await;

    assert!(response.status_code().is_client_error());
}
