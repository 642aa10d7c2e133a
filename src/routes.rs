//! Top-level router configuration.
//!
//! # Route structure
//!
//! - `GET    /{slug}`                - Short link redirect (public)
//! - `GET    /health`                - Readiness + storage backend indicator
//! - `POST   /api/links`             - Create a short link
//! - `GET    /api/links`             - List the caller's links
//! - `GET    /api/links/{id}`        - Fetch one link
//! - `DELETE /api/links/{id}`        - Delete a link
//! - `GET    /api/links/{id}/clicks` - Click events for a link
//! - `GET    /api/stats`             - Aggregate analytics snapshot
//!
//! Static paths (`/health`, `/api/...`) take precedence over the `/{slug}`
//! capture; slug validation additionally refuses reserved names so links can
//! never shadow service endpoints.

use axum::routing::{get, post};
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, health_handler,
    link_clicks_handler, list_links_handler, redirect_handler, stats_handler,
};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = Router::new()
        .route("/links", post(create_link_handler).get(list_links_handler))
        .route(
            "/links/{id}",
            get(get_link_handler).delete(delete_link_handler),
        )
        .route("/links/{id}/clicks", get(link_clicks_handler))
        .route("/stats", get(stats_handler));

    let router = Router::new()
        .route("/{slug}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
