//! Click message passed from the redirect handler to the background worker.

/// Raw redirect metadata for asynchronous click recording.
///
/// Created in the redirect handler and sent over a bounded channel so the
/// redirect response never waits on analytics writes. The worker derives the
/// device category and normalizes the referrer before persisting (see
/// [`crate::domain::click_worker::run_click_worker`]).
#[derive(Debug, Clone)]
pub struct ClickMessage {
    pub link_id: i64,
    pub ip: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickMessage {
    pub fn new(
        link_id: i64,
        ip: String,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}
