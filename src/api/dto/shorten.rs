//! DTOs for the shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to shorten a URL for a user.
///
/// URL and code rules are enforced by the allocation service so that their
/// failures keep their own error kinds. An empty or missing `short_code`
/// asks for a generated one.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,

    #[serde(default)]
    pub short_code: Option<String>,
}

/// The allocated (or re-used) short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub user_id: i64,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}
