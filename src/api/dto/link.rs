//! DTOs for link read endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// A link with its click counter.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub user_id: i64,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Builds the response, attaching the public short URL.
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            user_id: link.user_id,
            short_code: link.short_code,
            short_url,
            original_url: link.original_url,
            clicks: link.clicks,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}
