//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Request to create a short link.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    /// The original URL to shorten (must be absolute, with scheme and host).
    pub url: String,

    /// Optional custom slug. When absent or empty, a random slug is generated.
    pub slug: Option<String>,

    /// Optional expiry: `"never"`, `"1day"`, `"7days"`, `"30days"`, or an
    /// RFC 3339 timestamp.
    pub expires_at: Option<String>,
}

/// A link as returned by the API, including its resolvable short URL.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub owner_id: String,
    pub slug: String,
    pub short_url: String,
    pub original_url: String,
    pub clicks: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkResponse {
    pub fn from_link(link: Link, base_url: &str) -> Self {
        let short_url = format!("{}/{}", base_url.trim_end_matches('/'), link.slug);
        Self {
            id: link.id,
            owner_id: link.owner_id,
            slug: link.slug,
            short_url,
            original_url: link.original_url,
            clicks: link.clicks,
            active: link.active,
            created_at: link.created_at,
            expires_at: link.expires_at,
        }
    }
}
