//! Storage contract required by the application services.

use async_trait::async_trait;

use crate::domain::entities::{Link, NewLink, NewUser, User};
use crate::domain::errors::StoreError;

/// Durable mapping of users and links.
///
/// The services never hold shared state of their own; every coordination
/// guarantee they rely on comes from here:
///
/// - `short_code` is unique across all links, and a conflicting insert fails
///   with [`StoreError::CodeExists`] instead of overwriting anything
/// - `email` is unique across all users ([`StoreError::EmailExists`])
/// - [`Store::increment_clicks`] is a single atomic read-modify-write
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStore`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - process-local implementation
/// - `MockStore` generated by `mockall` under `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmailExists`] if the email is already registered.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no user has this id.
    async fn get_user_by_id(&self, id: i64) -> Result<User, StoreError>;

    /// Persists a new link with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CodeExists`] if the short code is already taken,
    /// including by a concurrent insert.
    async fn create_short_link(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the code is unknown.
    async fn get_by_short_code(&self, code: &str) -> Result<Link, StoreError>;

    /// Finds the link a user already created for an original URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the user has not shortened this URL.
    async fn get_by_original_url(&self, user_id: i64, url: &str) -> Result<Link, StoreError>;

    /// Atomically adds one to a link's click counter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the code is unknown.
    async fn increment_clicks(&self, code: &str) -> Result<(), StoreError>;

    /// Lists a user's links, newest first.
    async fn get_links_by_user_id(&self, user_id: i64) -> Result<Vec<Link>, StoreError>;

    /// Cheap connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
