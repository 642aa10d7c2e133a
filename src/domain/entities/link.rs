//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A shortened URL link with metadata.
///
/// Maps a globally unique slug to an original URL. The id and creation
/// timestamp are assigned by the store; the click counter only ever moves
/// forward via [`crate::domain::store::LinkStore::increment_clicks`].
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub id: i64,
    pub owner_id: String,
    pub slug: String,
    pub original_url: String,
    pub clicks: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }

    /// Returns true if the link counts as active at `now`:
    /// the active flag is set and the expiry, if any, is strictly in the future.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.active && self.expires_at.is_none_or(|e| e > now)
    }
}

/// Input data for creating a new link.
///
/// The store assigns id, creation timestamp, click counter (0) and the
/// active flag (true).
#[derive(Debug, Clone)]
pub struct NewLink {
    pub owner_id: String,
    pub slug: String,
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}
