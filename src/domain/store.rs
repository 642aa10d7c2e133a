//! Persistence abstraction over the link and click-event collections.

use crate::domain::entities::{ClickEvent, Link, NewClick, NewLink, StatsSnapshot};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for links and click events.
///
/// Two interchangeable implementations exist:
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - durable,
///   PostgreSQL-backed
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - in-process
///   fallback, lost on restart
///
/// The backend is chosen once at startup (see
/// [`crate::infrastructure::persistence::connect_store`]) and held behind this
/// trait for the lifetime of the process; no other code inspects which variant
/// is active.
///
/// Both implementations must produce identical results for identical operation
/// sequences, including [`Self::compute_stats`] aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Creates a new link, assigning id and creation timestamp and
    /// initializing `clicks = 0`, `active = true`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug already maps to an existing
    /// link (case-sensitive exact match).
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create_link(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by id. `Ok(None)` if unknown.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its slug. `Ok(None)` if unknown.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError>;

    /// Lists all links belonging to an owner, newest first
    /// (creation timestamp descending, id descending on ties).
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError>;

    /// Atomically increments the click counter by exactly 1 and returns the
    /// post-increment state. Concurrent increments against the same id never
    /// lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id is unknown.
    async fn increment_clicks(&self, id: i64) -> Result<Link, AppError>;

    /// Removes the link and its slug mapping atomically: no reader can observe
    /// the slug mapping without the link or vice versa. Click events for the
    /// link are kept (no cascading delete).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id is unknown, including on a
    /// repeated delete of the same id.
    async fn delete_link(&self, id: i64) -> Result<(), AppError>;

    /// Appends a click event, assigning id and timestamp.
    async fn record_click(&self, new_click: NewClick) -> Result<ClickEvent, AppError>;

    /// Lists click events for a link, newest first.
    async fn list_clicks(&self, link_id: i64) -> Result<Vec<ClickEvent>, AppError>;

    /// Computes the aggregate snapshot over all links and click events.
    ///
    /// Evaluated against "now": a link whose expiry has passed since creation
    /// no longer counts as active. Device strings outside the three known
    /// categories are dropped from the device breakdown.
    async fn compute_stats(&self) -> Result<StatsSnapshot, AppError>;
}
