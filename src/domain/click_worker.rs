//! Background worker persisting click analytics off the redirect path.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::click_event::ClickMessage;
use crate::domain::entities::NewClick;
use crate::domain::store::LinkStore;
use crate::utils::device::classify_device;

/// Referrer value recorded when the client sent no Referer header.
const DIRECT_REFERRER: &str = "direct";

/// Consumes click messages and writes analytics with best-effort semantics.
///
/// For every message exactly one `increment_clicks` and one `record_click`
/// call are issued, bounded by `timeout`. Failures and timeouts are logged and
/// swallowed: click counts may under-count relative to actual redirects, but a
/// redirect is never blocked or failed by an analytics write.
///
/// Runs until the sending side of the channel is dropped.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickMessage>,
    store: Arc<dyn LinkStore>,
    timeout: Duration,
) {
    while let Some(msg) = rx.recv().await {
        let link_id = msg.link_id;
        match tokio::time::timeout(timeout, record(&*store, msg)).await {
            Ok(()) => {}
            Err(_) => warn!(link_id, "click recording timed out, abandoning"),
        }
    }
}

async fn record(store: &dyn LinkStore, msg: ClickMessage) {
    if let Err(e) = store.increment_clicks(msg.link_id).await {
        warn!(link_id = msg.link_id, error = %e, "failed to increment click counter");
    }

    let user_agent = msg.user_agent.unwrap_or_default();
    let referer = match msg.referer {
        Some(r) if !r.is_empty() => r,
        _ => DIRECT_REFERRER.to_string(),
    };
    let device = classify_device(&user_agent).to_string();

    let new_click = NewClick {
        link_id: msg.link_id,
        ip: msg.ip,
        user_agent,
        referer,
        device,
    };

    if let Err(e) = store.record_click(new_click).await {
        warn!(link_id = msg.link_id, error = %e, "failed to record click event");
    }
}
