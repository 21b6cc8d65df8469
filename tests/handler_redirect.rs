mod common;

use axum::http::StatusCode;
use shortlink::infrastructure::persistence::InMemoryStore;
use std::sync::Arc;

#[tokio::test]
async fn test_redirect_success() {
    let store = Arc::new(InMemoryStore::new());
    let user_id = common::create_test_user(&store, "ann@example.com").await;
    common::create_test_link(&store, user_id, "redirect1", "https://example.com/target").await;
    let (server, _rx) = common::create_test_server(store);

    let response = server.get("/redirect1").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let store = Arc::new(InMemoryStore::new());
    let (server, _rx) = common::create_test_server(store);

    let response = server.get("/notfound").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_records_click() {
    let store = Arc::new(InMemoryStore::new());
    let user_id = common::create_test_user(&store, "ann@example.com").await;
    common::create_test_link(&store, user_id, "clickme", "https://example.com").await;
    let (server, mut rx) = common::create_test_server(store);

    server.get("/clickme").await.assert_status(StatusCode::FOUND);

    let click_event = rx.try_recv();
    assert!(click_event.is_ok());
    assert_eq!(click_event.unwrap().code, "clickme");
}

#[tokio::test]
async fn test_redirect_succeeds_when_click_queue_full() {
    let store = Arc::new(InMemoryStore::new());
    let user_id = common::create_test_user(&store, "ann@example.com").await;
    common::create_test_link(&store, user_id, "busy", "https://example.com/busy").await;
    let (state, mut rx) = common::create_test_state(store, 1);
    let server = axum_test::TestServer::new(shortlink::routes::router(state)).unwrap();

    for _ in 0..3 {
        let response = server.get("/busy").await;
        response.assert_status(StatusCode::FOUND);
        assert_eq!(response.header("location"), "https://example.com/busy");
    }

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_succeeds_when_click_queue_closed() {
    let store = Arc::new(InMemoryStore::new());
    let user_id = common::create_test_user(&store, "ann@example.com").await;
    common::create_test_link(&store, user_id, "closed", "https://example.com").await;
    let (state, rx) = common::create_test_state(store, 10);
    drop(rx);
    let server = axum_test::TestServer::new(shortlink::routes::router(state)).unwrap();

    server.get("/closed").await.assert_status(StatusCode::FOUND);
}
