//! Handler for link info.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::LinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a link with its current click count.
///
/// # Endpoint
///
/// `GET /links/{code}/info`
///
/// The count is eventually consistent: recent redirects may not be included
/// yet.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown.
pub async fn link_info_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.resolution_service.get_link_info(&code).await?;
    let short_url = state.short_url(&link.short_code);

    Ok(Json(LinkResponse::new(link, short_url)))
}
