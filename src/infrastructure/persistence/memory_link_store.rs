//! In-process fallback implementation of the link store.
//!
//! Holds both collections in memory behind reader-writer locks. Used when the
//! durable backend is unreachable at startup; everything stored here is lost
//! on restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{
    ClickEvent, DeviceBreakdown, Link, NewClick, NewLink, StatsSnapshot,
};
use crate::domain::store::LinkStore;
use crate::error::AppError;

/// Link collection plus its slug index.
///
/// Kept in one struct behind a single lock because creates and deletes mutate
/// both maps together; a reader must never observe a slug mapping without its
/// link or vice versa.
#[derive(Default)]
struct LinkTable {
    by_id: HashMap<i64, Link>,
    by_slug: HashMap<String, i64>,
}

/// In-memory [`LinkStore`] implementation.
///
/// Links and click events use independently-scoped locks; no single operation
/// mutates both collections, so no lock ordering issues arise.
pub struct MemoryLinkStore {
    links: RwLock<LinkTable>,
    clicks: RwLock<Vec<ClickEvent>>,
    next_link_id: AtomicI64,
    next_click_id: AtomicI64,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self {
            links: RwLock::new(LinkTable::default()),
            clicks: RwLock::new(Vec::new()),
            next_link_id: AtomicI64::new(1),
            next_click_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn create_link(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut table = self.links.write().await;

        if table.by_slug.contains_key(&new_link.slug) {
            return Err(AppError::conflict(
                "Slug already in use",
                json!({ "slug": new_link.slug }),
            ));
        }

        let link = Link {
            id: self.next_link_id.fetch_add(1, Ordering::Relaxed),
            owner_id: new_link.owner_id,
            slug: new_link.slug,
            original_url: new_link.original_url,
            clicks: 0,
            active: true,
            created_at: Utc::now(),
            expires_at: new_link.expires_at,
        };

        table.by_slug.insert(link.slug.clone(), link.id);
        table.by_id.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.links.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        let table = self.links.read().await;
        Ok(table
            .by_slug
            .get(slug)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        let table = self.links.read().await;

        let mut links: Vec<Link> = table
            .by_id
            .values()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(links)
    }

    async fn increment_clicks(&self, id: i64) -> Result<Link, AppError> {
        let mut table = self.links.write().await;

        let link = table
            .by_id
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;
        link.clicks += 1;

        Ok(link.clone())
    }

    async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        let mut table = self.links.write().await;

        let link = table
            .by_id
            .remove(&id)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;
        table.by_slug.remove(&link.slug);

        Ok(())
    }

    async fn record_click(&self, new_click: NewClick) -> Result<ClickEvent, AppError> {
        let event = ClickEvent {
            id: self.next_click_id.fetch_add(1, Ordering::Relaxed),
            link_id: new_click.link_id,
            ip: new_click.ip,
            user_agent: new_click.user_agent,
            referer: new_click.referer,
            device: new_click.device,
            created_at: Utc::now(),
        };

        self.clicks.write().await.push(event.clone());

        Ok(event)
    }

    async fn list_clicks(&self, link_id: i64) -> Result<Vec<ClickEvent>, AppError> {
        let clicks = self.clicks.read().await;

        let mut events: Vec<ClickEvent> = clicks
            .iter()
            .filter(|c| c.link_id == link_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(events)
    }

    async fn compute_stats(&self) -> Result<StatsSnapshot, AppError> {
        let mut snapshot = StatsSnapshot::default();
        let now = Utc::now();

        {
            let table = self.links.read().await;
            snapshot.total_links = table.by_id.len() as i64;
            snapshot.active_links =
                table.by_id.values().filter(|l| l.is_active_at(now)).count() as i64;
        }

        let clicks = self.clicks.read().await;
        snapshot.total_clicks = clicks.len() as i64;

        let mut devices = DeviceBreakdown::default();
        for event in clicks.iter() {
            match event.device.as_str() {
                "mobile" => devices.mobile += 1,
                "desktop" => devices.desktop += 1,
                "tablet" => devices.tablet += 1,
                // Unknown device strings fall out of the breakdown entirely.
                _ => {}
            }

            *snapshot
                .referrers
                .entry(event.referer.clone())
                .or_insert(0) += 1;
        }
        snapshot.devices = devices;

        Ok(snapshot)
    }
}
