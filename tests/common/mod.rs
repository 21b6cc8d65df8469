#![allow(dead_code)]

use axum_test::TestServer;
use shortlink::domain::click_event::ClickEvent;
use shortlink::domain::entities::{Link, NewLink, NewUser};
use shortlink::domain::store::Store;
use shortlink::infrastructure::persistence::InMemoryStore;
use shortlink::routes;
use shortlink::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "https://s.example.com";

pub fn create_test_state(
    store: Arc<InMemoryStore>,
    queue_capacity: usize,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(queue_capacity);
    let state = AppState::new(store, tx, BASE_URL, 6);

    (state, rx)
}

pub fn create_test_server(
    store: Arc<InMemoryStore>,
) -> (TestServer, mpsc::Receiver<ClickEvent>) {
    let (state, rx) = create_test_state(store, 100);
    let server = TestServer::new(routes::router(state)).unwrap();

    (server, rx)
}

pub async fn create_test_user(store: &InMemoryStore, email: &str) -> i64 {
    store
        .create_user(NewUser {
            email: email.to_string(),
        })
        .await
        .unwrap()
        .id
}

pub async fn create_test_link(store: &InMemoryStore, user_id: i64, code: &str, url: &str) -> Link {
    store
        .create_short_link(NewLink {
            user_id,
            short_code: code.to_string(),
            original_url: url.to_string(),
        })
        .await
        .unwrap()
}
