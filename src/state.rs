//! Shared state injected into every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AllocationService, ResolutionService, UserService};
use crate::domain::click_event::ClickEvent;
use crate::domain::store::Store;

/// Services and settings shared across requests.
///
/// Cloning is cheap; every service is behind an `Arc`. The state holds the
/// only click sender, so dropping the last clone lets the click worker drain
/// and stop.
#[derive(Clone)]
pub struct AppState {
    pub allocation_service: Arc<AllocationService<dyn Store>>,
    pub resolution_service: Arc<ResolutionService<dyn Store>>,
    pub user_service: Arc<UserService<dyn Store>>,
    pub store: Arc<dyn Store>,
    pub base_url: String,
}

impl AppState {
    /// Wires the services around one injected store.
    pub fn new(
        store: Arc<dyn Store>,
        click_sender: mpsc::Sender<ClickEvent>,
        base_url: impl Into<String>,
        code_length: usize,
    ) -> Self {
        Self {
            allocation_service: Arc::new(AllocationService::with_code_length(
                store.clone(),
                code_length,
            )),
            resolution_service: Arc::new(ResolutionService::new(store.clone(), click_sender)),
            user_service: Arc::new(UserService::new(store.clone())),
            store,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Full public URL for a short code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
