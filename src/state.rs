//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{LinkService, StatsService};
use crate::domain::click_event::ClickMessage;
use crate::infrastructure::persistence::StorageBackend;

/// Application state shared across all handlers.
///
/// `backend` is decided once at startup and never changes; handlers read it
/// to report degraded (non-durable) operation but never branch business logic
/// on it.
#[derive(Clone)]
pub struct AppState {
    pub links: Arc<LinkService>,
    pub stats: Arc<StatsService>,
    pub click_tx: mpsc::Sender<ClickMessage>,
    pub backend: StorageBackend,
    pub base_url: String,
}
