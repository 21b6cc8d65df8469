//! API route configuration.

use crate::api::handlers::{
    create_user_handler, link_info_handler, shorten_handler, user_links_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// User and link management routes.
///
/// # Endpoints
///
/// - `POST /users`               - Register a user
/// - `POST /users/{id}/shorten`  - Shorten a URL for a user
/// - `GET  /users/{id}/links`    - List a user's links, newest first
/// - `GET  /links/{code}/info`   - Link details with click count
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user_handler))
        .route("/users/{id}/shorten", post(shorten_handler))
        .route("/users/{id}/links", get(user_links_handler))
        .route("/links/{code}/info", get(link_info_handler))
}
