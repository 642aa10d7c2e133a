//! Link creation, retrieval and redirect resolution.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::store::LinkStore;
use crate::error::AppError;
use crate::utils::expiry::parse_expiry;
use crate::utils::slug::{generate_slug, is_reserved, validate_slug};
use crate::utils::url_check::is_valid_url;

/// Orchestrates link operations over the selected store backend.
///
/// All validation happens here, before any store mutation; the store itself
/// enforces slug uniqueness a second time so concurrent creates with the same
/// slug resolve to exactly one winner.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    slug_length: usize,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `slug_length` is the length of auto-generated slugs (custom slugs are
    /// accepted at any length that passes charset validation).
    pub fn new(store: Arc<dyn LinkStore>, slug_length: usize) -> Self {
        Self { store, slug_length }
    }

    /// Creates a short link.
    ///
    /// If `requested_slug` is absent or empty, a random slug is generated
    /// with a bounded collision-retry loop.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL, slug or expiry
    /// specification, [`AppError::Conflict`] when the requested slug is
    /// already taken, and [`AppError::Internal`] on storage failure. None of
    /// these leave partial writes behind.
    pub async fn create_link(
        &self,
        owner_id: String,
        original_url: String,
        requested_slug: Option<String>,
        expiry_spec: Option<String>,
    ) -> Result<Link, AppError> {
        if !is_valid_url(&original_url) {
            return Err(AppError::bad_request(
                "Invalid URL format",
                json!({ "url": original_url }),
            ));
        }

        let expires_at = parse_expiry(expiry_spec.as_deref(), Utc::now())?;

        let slug = match requested_slug.filter(|s| !s.is_empty()) {
            Some(custom) => {
                if !validate_slug(&custom) {
                    return Err(AppError::bad_request(
                        "Invalid slug format. Use only letters, numbers, hyphens, and underscores",
                        json!({ "slug": custom }),
                    ));
                }

                if is_reserved(&custom) {
                    return Err(AppError::bad_request(
                        "This slug is reserved",
                        json!({ "slug": custom }),
                    ));
                }

                if self.store.find_by_slug(&custom).await?.is_some() {
                    return Err(AppError::conflict(
                        "Slug already in use",
                        json!({ "slug": custom }),
                    ));
                }

                custom
            }
            None => self.generate_unique_slug().await?,
        };

        self.store
            .create_link(NewLink {
                owner_id,
                slug,
                original_url,
                expires_at,
            })
            .await
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    /// Lists an owner's links, newest first.
    pub async fn list_links(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        self.store.list_by_owner(owner_id).await
    }

    /// Deletes a link and its slug mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown (or already deleted) id.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        self.store.delete_link(id).await
    }

    /// Resolves a slug for redirection.
    ///
    /// Click recording is not performed here; the redirect handler enqueues it
    /// separately so resolution stays read-only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown slug and
    /// [`AppError::Gone`] for an inactive or expired link.
    pub async fn resolve(&self, slug: &str) -> Result<Link, AppError> {
        let link = self
            .store
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "slug": slug })))?;

        if !link.active {
            return Err(AppError::gone(
                "This link is inactive",
                json!({ "slug": slug }),
            ));
        }

        if link.is_expired() {
            return Err(AppError::gone(
                "This link has expired",
                json!({ "slug": slug }),
            ));
        }

        Ok(link)
    }

    /// Generates a random slug, retrying a bounded number of times on
    /// collision before failing.
    async fn generate_unique_slug(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let slug = generate_slug(self.slug_length)?;

            if self.store.find_by_slug(&slug).await?.is_none() {
                return Ok(slug);
            }
        }

        Err(AppError::internal(
            "Failed to allocate a unique slug",
            json!({ "attempts": MAX_ATTEMPTS }),
        ))
    }
}
