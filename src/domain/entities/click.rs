//! Click event entity recorded once per successful redirect.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A click event on a shortened link.
///
/// Immutable after creation. `link_id` is a foreign reference, not ownership:
/// deleting a link does not cascade to its click events.
#[derive(Debug, Clone, Serialize)]
pub struct ClickEvent {
    pub id: i64,
    pub link_id: i64,
    pub ip: String,
    pub user_agent: String,
    /// Referrer string; an empty referrer is normalized to `"direct"` before
    /// the event reaches the store.
    pub referer: String,
    /// Derived device category: `"mobile"`, `"desktop"` or `"tablet"`.
    pub device: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a new click event.
///
/// `referer` must already be normalized and `device` already classified; the
/// store assigns id and timestamp only.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
    pub device: String,
}
