//! Original-URL validation.

use url::Url;

/// Returns true iff `input` parses as an absolute URL with both a scheme and
/// a host.
///
/// Only syntactic validity is checked; no network lookups are performed.
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => !url.scheme().is_empty() && url.has_host(),
        Err(_) => false,
    }
}
