//! PostgreSQL implementation of the link store.
//!
//! Atomicity relies on single-statement SQL: `RETURNING`-based writes, a
//! unique constraint on the slug column, and `clicks = clicks + 1` for
//! lost-update-free increments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    ClickEvent, DeviceBreakdown, Link, NewClick, NewLink, StatsSnapshot,
};
use crate::domain::store::LinkStore;
use crate::error::{AppError, map_sqlx_error};

const LINK_COLUMNS: &str = "id, owner_id, slug, original_url, clicks, active, created_at, expires_at";
const CLICK_COLUMNS: &str = "id, link_id, ip, user_agent, referer, device, created_at";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    owner_id: String,
    slug: String,
    original_url: String,
    clicks: i64,
    active: bool,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            owner_id: row.owner_id,
            slug: row.slug,
            original_url: row.original_url,
            clicks: row.clicks,
            active: row.active,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    ip: String,
    user_agent: String,
    referer: String,
    device: String,
    created_at: DateTime<Utc>,
}

impl From<ClickRow> for ClickEvent {
    fn from(row: ClickRow) -> Self {
        ClickEvent {
            id: row.id,
            link_id: row.link_id,
            ip: row.ip,
            user_agent: row.user_agent,
            referer: row.referer,
            device: row.device,
            created_at: row.created_at,
        }
    }
}

/// Durable [`LinkStore`] implementation backed by PostgreSQL.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Creates a new store over a connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn create_link(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "INSERT INTO links (owner_id, slug, original_url, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(&new_link.owner_id)
        .bind(&new_link.slug)
        .bind(&new_link.original_url)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links
             WHERE owner_id = $1
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn increment_clicks(&self, id: i64) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "UPDATE links SET clicks = clicks + 1
             WHERE id = $1
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn record_click(&self, new_click: NewClick) -> Result<ClickEvent, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(&format!(
            "INSERT INTO link_clicks (link_id, ip, user_agent, referer, device)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {CLICK_COLUMNS}"
        ))
        .bind(new_click.link_id)
        .bind(&new_click.ip)
        .bind(&new_click.user_agent)
        .bind(&new_click.referer)
        .bind(&new_click.device)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn list_clicks(&self, link_id: i64) -> Result<Vec<ClickEvent>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(&format!(
            "SELECT {CLICK_COLUMNS} FROM link_clicks
             WHERE link_id = $1
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn compute_stats(&self) -> Result<StatsSnapshot, AppError> {
        let total_clicks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        let total_links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        let active_links: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM links
             WHERE active AND (expires_at IS NULL OR expires_at > NOW())",
        )
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        let device_rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT device, COUNT(*) FROM link_clicks GROUP BY device")
                .fetch_all(self.pool.as_ref())
                .await
                .map_err(map_sqlx_error)?;

        let mut devices = DeviceBreakdown::default();
        for (device, count) in device_rows {
            match device.as_str() {
                "mobile" => devices.mobile = count,
                "desktop" => devices.desktop = count,
                "tablet" => devices.tablet = count,
                // Unknown device strings fall out of the breakdown entirely.
                _ => {}
            }
        }

        let referrer_rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT referer, COUNT(*) FROM link_clicks GROUP BY referer")
                .fetch_all(self.pool.as_ref())
                .await
                .map_err(map_sqlx_error)?;

        Ok(StatsSnapshot {
            total_clicks,
            total_links,
            active_links,
            devices,
            referrers: referrer_rows.into_iter().collect(),
        })
    }
}
