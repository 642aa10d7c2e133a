//! Analytics aggregation service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{ClickEvent, StatsSnapshot};
use crate::domain::store::LinkStore;
use crate::error::AppError;

/// Read-only service over the click analytics held by the store.
pub struct StatsService {
    store: Arc<dyn LinkStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Computes the aggregate snapshot on demand; nothing is cached.
    pub async fn overview(&self) -> Result<StatsSnapshot, AppError> {
        self.store.compute_stats().await
    }

    /// Lists click events for a link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn clicks_for_link(&self, link_id: i64) -> Result<Vec<ClickEvent>, AppError> {
        if self.store.find_by_id(link_id).await?.is_none() {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "id": link_id }),
            ));
        }

        self.store.list_clicks(link_id).await
    }
}
