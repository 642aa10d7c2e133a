//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use std::net::SocketAddr;
use tracing::warn;

use crate::domain::click_event::ClickMessage;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its original URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Click tracking
///
/// After a successful resolve the raw request metadata is sent to a bounded
/// channel and the 307 response is returned immediately; analytics writes
/// happen in the background worker and never delay or fail the redirect. A
/// full queue drops the click with a warning (fire-and-forget).
///
/// # Errors
///
/// Returns 404 for an unknown slug and 410 for an inactive or expired link.
/// Neither writes any click data.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Redirect, AppError> {
    let link = state.links.resolve(&slug).await?;

    let user_agent = headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok());
    let referer = headers.get(header::REFERER).and_then(|v| v.to_str().ok());

    let message = ClickMessage::new(link.id, addr.ip().to_string(), user_agent, referer);
    if state.click_tx.try_send(message).is_err() {
        warn!(link_id = link.id, "click queue full or closed, dropping click");
    }

    Ok(Redirect::temporary(&link.original_url))
}
