//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A short code owned by a user and pointing at an original URL.
///
/// `short_code` is unique across all links. `clicks` only ever grows, and only
/// through the store's atomic increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub id: i64,
    pub user_id: i64,
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        user_id: i64,
        short_code: String,
        original_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            short_code,
            original_url,
            clicks,
            created_at,
            updated_at,
        }
    }

    /// Returns true if this link is exactly the `(user, code, url)` triple.
    pub fn is_same_allocation(&self, user_id: i64, short_code: &str, original_url: &str) -> bool {
        self.user_id == user_id && self.short_code == short_code && self.original_url == original_url
    }
}

/// Input data for creating a new link. New links always start with zero clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub user_id: i64,
    pub short_code: String,
    pub original_url: String,
}
