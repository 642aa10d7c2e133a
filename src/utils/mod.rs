//! Utility functions for slug handling, classification and input validation.
//!
//! - [`slug`] - Slug generation and charset validation
//! - [`device`] - Device category classification from User-Agent strings
//! - [`expiry`] - Expiry specification parsing
//! - [`url_check`] - Absolute-URL validation

pub mod device;
pub mod expiry;
pub mod slug;
pub mod url_check;
