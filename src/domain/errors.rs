//! Closed error taxonomy for allocation, resolution, and user operations.

use thiserror::Error;

/// Errors reported by a [`crate::domain::store::Store`].
///
/// Uniqueness and existence failures are classified here so services can
/// match on them structurally. Anything else is an opaque backend failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("short code already exists")]
    CodeExists,

    #[error("email already exists")]
    EmailExists,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    /// Wraps any backend failure as an opaque store error.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}

/// Errors produced by the application services.
///
/// Every variant except [`ShortenError::Store`] is a classified outcome with a
/// dedicated status at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("user not found")]
    UserNotFound,

    #[error("URL is invalid")]
    InvalidUrl,

    #[error("short code is invalid")]
    InvalidCode,

    #[error("short code already exists")]
    CodeExists,

    #[error("URL already shortened: {code}")]
    UrlAlreadyShortened { code: String },

    #[error("system is busy, try again later")]
    GenerationExhausted,

    #[error("email already exists")]
    EmailExists,

    #[error("link not found")]
    NotFound,

    #[error("storage failure: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ShortenError {
    /// Lifts store classifications into service errors.
    ///
    /// `NotFound` is mapped to the link-level [`ShortenError::NotFound`];
    /// callers looking up users translate it to `UserNotFound` themselves.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::CodeExists => Self::CodeExists,
            StoreError::EmailExists => Self::EmailExists,
            backend @ StoreError::Backend(_) => Self::Store(backend),
        }
    }
}
