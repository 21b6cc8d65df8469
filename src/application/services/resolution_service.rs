//! Short code resolution with decoupled click counting.

use std::sync::Arc;

use metrics::counter;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::Link;
use crate::domain::errors::ShortenError;
use crate::domain::store::Store;

/// Service that resolves short codes and owns click counting.
///
/// Resolution never waits for the counter: the increment is queued on a
/// bounded channel consumed by [`crate::domain::click_worker::run_click_worker`].
/// Click counts are therefore eventually consistent, and a click may be lost
/// if the queue is full or the process stops before the worker drains it.
pub struct ResolutionService<S: Store + ?Sized> {
    store: Arc<S>,
    click_sender: mpsc::Sender<ClickEvent>,
}

impl<S: Store + ?Sized> ResolutionService<S> {
    /// Creates a resolution service dispatching clicks to `click_sender`.
    pub fn new(store: Arc<S>, click_sender: mpsc::Sender<ClickEvent>) -> Self {
        Self {
            store,
            click_sender,
        }
    }

    /// Returns the original URL for `code` and schedules a click increment.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::NotFound`] if the code is unknown. Problems with
    /// the click increment are never reported here.
    pub async fn resolve_and_count(&self, code: &str) -> Result<String, ShortenError> {
        let link = self.store.get_by_short_code(code).await?;

        self.dispatch_click(ClickEvent::new(link.short_code));

        Ok(link.original_url)
    }

    /// Retrieves a link with its current click count.
    ///
    /// The count may not yet include resolutions whose increment is queued.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::NotFound`] if the code is unknown.
    pub async fn get_link_info(&self, code: &str) -> Result<Link, ShortenError> {
        Ok(self.store.get_by_short_code(code).await?)
    }

    /// Returns true while the click worker is still receiving events.
    pub fn is_click_queue_open(&self) -> bool {
        !self.click_sender.is_closed()
    }

    /// Free slots in the click queue.
    pub fn click_queue_capacity(&self) -> usize {
        self.click_sender.capacity()
    }

    fn dispatch_click(&self, event: ClickEvent) {
        match self.click_sender.try_send(event) {
            Ok(()) => counter!("clicks_dispatched_total").increment(1),
            Err(TrySendError::Full(event)) => {
                counter!("clicks_dropped_total").increment(1);
                warn!(code = %event.code, "Click queue full, click dropped");
            }
            Err(TrySendError::Closed(event)) => {
                counter!("clicks_dropped_total").increment(1);
                warn!(code = %event.code, "Click queue closed, click dropped");
            }
        }
    }
}
