//! Short code allocation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::user_service::require_user;
use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{ShortenError, StoreError};
use crate::domain::store::Store;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code};
use crate::utils::code_validator::is_valid_code;
use crate::utils::url_validator::is_valid_url;

/// Generation rounds before giving up with [`ShortenError::GenerationExhausted`].
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Service that owns link creation.
///
/// Duplicate detection is optimistic: the service checks the store before
/// writing, and the store's uniqueness constraint on `short_code` settles
/// whatever races slip past the check. A lost race surfaces as
/// [`ShortenError::CodeExists`] or as another generation round, never as a
/// second link for the same code.
pub struct AllocationService<S: Store + ?Sized> {
    store: Arc<S>,
    code_length: usize,
}

impl<S: Store + ?Sized> AllocationService<S> {
    /// Creates an allocation service generating codes of the default length.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_code_length(store, DEFAULT_CODE_LENGTH)
    }

    /// Creates an allocation service generating codes of `code_length` symbols.
    pub fn with_code_length(store: Arc<S>, code_length: usize) -> Self {
        Self { store, code_length }
    }

    /// Length of generated codes.
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Maps `original_url` to a short code owned by `user_id`.
    ///
    /// With `short_code` set (and non-empty) the caller's code is used;
    /// otherwise one is generated. Resubmitting an identical
    /// `(user, code, url)` request returns the existing link.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::UserNotFound`] if the user does not exist
    /// - [`ShortenError::InvalidUrl`] if `original_url` is not an absolute URI
    /// - [`ShortenError::InvalidCode`] if the supplied code breaks the code rules
    /// - [`ShortenError::UrlAlreadyShortened`] if the user already has another
    ///   code for this URL (the error carries that code)
    /// - [`ShortenError::CodeExists`] if the supplied code belongs to another link
    /// - [`ShortenError::GenerationExhausted`] if every generated candidate collided
    /// - [`ShortenError::Store`] on any other storage failure
    pub async fn create_short(
        &self,
        user_id: i64,
        short_code: Option<&str>,
        original_url: &str,
    ) -> Result<Link, ShortenError> {
        require_user(self.store.as_ref(), user_id).await?;

        if !is_valid_url(original_url) {
            return Err(ShortenError::InvalidUrl);
        }

        match short_code.filter(|code| !code.is_empty()) {
            Some(code) => self.allocate_supplied(user_id, code, original_url).await,
            None => self.allocate_generated(user_id, original_url).await,
        }
    }

    async fn allocate_supplied(
        &self,
        user_id: i64,
        code: &str,
        original_url: &str,
    ) -> Result<Link, ShortenError> {
        if !is_valid_code(code) {
            return Err(ShortenError::InvalidCode);
        }

        let code_taken = match self.store.get_by_short_code(code).await {
            Ok(link) if link.is_same_allocation(user_id, code, original_url) => {
                debug!(user_id, code, "Idempotent resubmission, returning existing link");
                return Ok(link);
            }
            Ok(_) => true,
            Err(StoreError::NotFound) => false,
            Err(e) => return Err(e.into()),
        };

        if let Some(existing) = self.find_by_original_url(user_id, original_url).await? {
            return Err(ShortenError::UrlAlreadyShortened {
                code: existing.short_code,
            });
        }

        if code_taken {
            return Err(ShortenError::CodeExists);
        }

        let new_link = NewLink {
            user_id,
            short_code: code.to_string(),
            original_url: original_url.to_string(),
        };

        match self.store.create_short_link(new_link).await {
            Ok(link) => {
                info!(user_id, code, "Short link created with supplied code");
                Ok(link)
            }
            Err(StoreError::CodeExists) => self.resolve_insert_race(user_id, code, original_url).await,
            Err(e) => Err(e.into()),
        }
    }

    /// Decides the outcome when a supplied code was inserted concurrently.
    ///
    /// If the winner is the same `(user, code, url)` allocation, the request
    /// is an idempotent resubmission; otherwise the code is taken.
    async fn resolve_insert_race(
        &self,
        user_id: i64,
        code: &str,
        original_url: &str,
    ) -> Result<Link, ShortenError> {
        match self.store.get_by_short_code(code).await {
            Ok(winner) if winner.is_same_allocation(user_id, code, original_url) => Ok(winner),
            Ok(_) | Err(StoreError::NotFound) => Err(ShortenError::CodeExists),
            Err(e) => Err(e.into()),
        }
    }

    async fn allocate_generated(
        &self,
        user_id: i64,
        original_url: &str,
    ) -> Result<Link, ShortenError> {
        if let Some(existing) = self.find_by_original_url(user_id, original_url).await? {
            return Err(ShortenError::UrlAlreadyShortened {
                code: existing.short_code,
            });
        }

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = generate_code(self.code_length);

            let new_link = NewLink {
                user_id,
                short_code: candidate.clone(),
                original_url: original_url.to_string(),
            };

            match self.store.create_short_link(new_link).await {
                Ok(link) => {
                    info!(user_id, code = %link.short_code, attempt, "Short link created");
                    return Ok(link);
                }
                Err(StoreError::CodeExists) => {
                    debug!(attempt, code = %candidate, "Generated code collided, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            user_id,
            attempts = MAX_GENERATION_ATTEMPTS,
            "Failed to generate a unique short code"
        );
        Err(ShortenError::GenerationExhausted)
    }

    async fn find_by_original_url(
        &self,
        user_id: i64,
        original_url: &str,
    ) -> Result<Option<Link>, ShortenError> {
        match self.store.get_by_original_url(user_id, original_url).await {
            Ok(link) => Ok(Some(link)),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
