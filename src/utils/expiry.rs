//! Parsing of link expiry specifications.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::error::AppError;

/// Parses an expiry specification into an absolute timestamp.
///
/// Accepted values:
///
/// - `None`, `""` or `"never"` - no expiration
/// - `"1day"`, `"7days"`, `"30days"` - relative offsets from `now`
/// - an RFC 3339 timestamp - used as-is
///
/// # Errors
///
/// Returns [`AppError::Validation`] for any other value.
pub fn parse_expiry(
    spec: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let spec = match spec {
        None | Some("") | Some("never") => return Ok(None),
        Some(s) => s,
    };

    let expiry = match spec {
        "1day" => now + Duration::days(1),
        "7days" => now + Duration::days(7),
        "30days" => now + Duration::days(30),
        other => DateTime::parse_from_rfc3339(other)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| {
                AppError::bad_request("Invalid expiry format", json!({ "expires_at": other }))
            })?,
    };

    Ok(Some(expiry))
}
