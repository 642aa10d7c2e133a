//! Slug generation and validation.
//!
//! Slugs are drawn from the 62-character alphanumeric alphabet using the OS
//! CSPRNG. If the random source is unavailable the operation fails loudly
//! rather than degrading to a biased or deterministic pattern, which would
//! silently weaken the uniqueness guarantee.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Alphabet for generated slugs.
const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Largest multiple of 62 that fits in a byte; bytes at or above this value
/// are discarded so sampling stays uniform (no modulo bias).
const REJECTION_LIMIT: u8 = 248;

/// Slugs reserved for service endpoints to prevent routing conflicts.
const RESERVED_SLUGS: &[&str] = &["api", "health"];

/// Compiled charset check for custom slugs: letters, digits, hyphen, underscore.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Generates a random alphanumeric slug of exactly `length` characters.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the OS random source fails. The
/// operation is never silently retried with weaker entropy.
pub fn generate_slug(length: usize) -> Result<String, AppError> {
    let mut slug = String::with_capacity(length);
    let mut buf = [0u8; 64];

    while slug.len() < length {
        getrandom::fill(&mut buf).map_err(|e| {
            AppError::internal(
                "Random source unavailable",
                json!({ "reason": e.to_string() }),
            )
        })?;

        for &byte in buf.iter() {
            if byte < REJECTION_LIMIT {
                slug.push(ALPHABET[(byte % 62) as usize] as char);
                if slug.len() == length {
                    break;
                }
            }
        }
    }

    Ok(slug)
}

/// Returns true iff `slug` is non-empty and every character is alphanumeric,
/// a hyphen, or an underscore.
pub fn validate_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Returns true if the slug collides with a service endpoint path.
pub fn is_reserved(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}
