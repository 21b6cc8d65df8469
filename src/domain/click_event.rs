//! Click event model for decoupled click counting.

/// A resolved short code whose counter still has to be incremented.
///
/// Created by [`crate::application::services::ResolutionService`] after a
/// successful lookup and handed to [`crate::domain::click_worker::run_click_worker`]
/// through a bounded channel, so the caller never waits on the increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    /// Creates a new click event for `code`.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
