//! DTOs for analytics endpoints.

use serde::Serialize;

use crate::domain::entities::ClickEvent;

/// Click events recorded for one link, newest first.
#[derive(Debug, Serialize)]
pub struct ClicksResponse {
    pub link_id: i64,
    pub total: usize,
    pub items: Vec<ClickEvent>,
}

impl ClicksResponse {
    pub fn new(link_id: i64, items: Vec<ClickEvent>) -> Self {
        Self {
            link_id,
            total: items.len(),
            items,
        }
    }
}
