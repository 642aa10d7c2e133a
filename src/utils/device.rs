//! Device category classification from User-Agent strings.

/// Substrings identifying mobile devices. Checked before tablet tokens, so a
/// user agent containing both classifies as mobile.
const MOBILE_TOKENS: &[&str] = &["mobile", "android", "iphone", "ipod"];

/// Substrings identifying tablets.
const TABLET_TOKENS: &[&str] = &["ipad", "tablet"];

/// Classifies a User-Agent string as `"mobile"`, `"tablet"` or `"desktop"`.
///
/// Case-insensitive substring matching; total over all inputs (unknown or
/// empty user agents fall through to `"desktop"`).
pub fn classify_device(user_agent: &str) -> &'static str {
    let ua = user_agent.to_ascii_lowercase();

    if MOBILE_TOKENS.iter().any(|t| ua.contains(t)) {
        return "mobile";
    }

    if TABLET_TOKENS.iter().any(|t| ua.contains(t)) {
        return "tablet";
    }

    "desktop"
}
