//! Handlers for user endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::LinkResponse;
use crate::api::dto::user::{CreateUserRequest, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a user.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Request Body
///
/// ```json
/// { "email": "ann@example.com" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the email is malformed.
/// Returns 409 Conflict if the email is already registered.
pub async fn create_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = state.user_service.create_user(&payload.email).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Lists a user's links, newest first.
///
/// # Endpoint
///
/// `GET /users/{id}/links`
///
/// # Errors
///
/// Returns 400 Bad Request if `id` is not a number.
/// Returns 404 Not Found if the user does not exist.
pub async fn user_links_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let user_id = parse_user_id(&id)?;

    let links = state.user_service.get_user_links(user_id).await?;

    Ok(Json(
        links
            .into_iter()
            .map(|link| {
                let short_url = state.short_url(&link.short_code);
                LinkResponse::new(link, short_url)
            })
            .collect(),
    ))
}

/// Parses the `{id}` path segment.
pub(crate) fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(AppError::bad_request(
            "Invalid user_id",
            json!({ "user_id": raw }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42").unwrap(), 42);
        assert!(parse_user_id("abc").is_err());
        assert!(parse_user_id("").is_err());
        assert!(parse_user_id("0").is_err());
        assert!(parse_user_id("-5").is_err());
    }
}
