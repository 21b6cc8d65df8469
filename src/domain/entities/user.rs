//! User entity representing a link owner.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered user who owns short links.
///
/// `email` is globally unique; uniqueness is enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(id: i64, email: String, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
}
