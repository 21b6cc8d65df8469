//! Handler for the shortening endpoint.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::handlers::users::parse_user_id;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a user.
///
/// # Endpoint
///
/// `POST /users/{id}/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "short_code": "my-link" }
/// ```
///
/// `short_code` is optional; without it a random code is generated.
/// Resubmitting the same `url` and `short_code` returns the existing link.
///
/// # Response
///
/// ```json
/// {
///   "short_code": "my-link",
///   "short_url": "http://localhost:3000/my-link",
///   "original_url": "https://example.com",
///   "user_id": 1,
///   "clicks": 0,
///   "created_at": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for a malformed body, URL, or short code
/// - 404 Not Found if the user does not exist
/// - 409 Conflict if the code is taken or the URL was already shortened
///   (`details.existing_code` names the earlier code)
/// - 500 Internal Server Error if no free code could be generated
pub async fn shorten_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let user_id = parse_user_id(&id)?;
    let Json(payload) = payload?;

    let link = state
        .allocation_service
        .create_short(user_id, payload.short_code.as_deref(), &payload.url)
        .await?;

    let short_url = state.short_url(&link.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_code: link.short_code,
            short_url,
            original_url: link.original_url,
            user_id: link.user_id,
            clicks: link.clicks,
            created_at: link.created_at,
        }),
    ))
}
