//! User registration and per-user link listing.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::{Link, NewUser, User};
use crate::domain::errors::{ShortenError, StoreError};
use crate::domain::store::Store;

/// Service for creating users and reading their links.
pub struct UserService<S: Store + ?Sized> {
    store: Arc<S>,
}

impl<S: Store + ?Sized> UserService<S> {
    /// Creates a new user service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Registers a user with the given email.
    ///
    /// The email is stored as given. Callers trim and check its syntax; the
    /// store enforces uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::EmailExists`] if the email is taken.
    pub async fn create_user(&self, email: &str) -> Result<User, ShortenError> {
        let user = self
            .store
            .create_user(NewUser {
                email: email.to_string(),
            })
            .await?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Retrieves a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::UserNotFound`] if no user has this id.
    pub async fn get_user(&self, user_id: i64) -> Result<User, ShortenError> {
        require_user(self.store.as_ref(), user_id).await
    }

    /// Lists a user's links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::UserNotFound`] if no user has this id.
    pub async fn get_user_links(&self, user_id: i64) -> Result<Vec<Link>, ShortenError> {
        require_user(self.store.as_ref(), user_id).await?;
        Ok(self.store.get_links_by_user_id(user_id).await?)
    }
}

/// Looks up a user, mapping a missing record to [`ShortenError::UserNotFound`].
pub(crate) async fn require_user<S>(store: &S, user_id: i64) -> Result<User, ShortenError>
where
    S: Store + ?Sized,
{
    match store.get_user_by_id(user_id).await {
        Ok(user) => Ok(user),
        Err(StoreError::NotFound) => Err(ShortenError::UserNotFound),
        Err(e) => Err(e.into()),
    }
}
