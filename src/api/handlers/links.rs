//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::{Value, json};

use crate::api::dto::links::{CreateLinkRequest, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the opaque caller identity.
///
/// Authentication itself is an upstream concern (reverse proxy or gateway);
/// this service only scopes link listings by whatever identity it is handed.
pub const OWNER_HEADER: &str = "x-owner-id";

/// Extracts the caller identity from request headers.
pub(crate) fn owner_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(OWNER_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .ok_or_else(|| {
            AppError::bad_request(
                "Missing caller identity",
                json!({ "header": OWNER_HEADER }),
            )
        })
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Response codes
///
/// - **201 Created** with the link
/// - **400** invalid URL, slug, or expiry
/// - **409** requested slug already taken
pub async fn create_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let owner_id = owner_from_headers(&headers)?;

    let link = state
        .links
        .create_link(owner_id, req.url, req.slug, req.expires_at)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state.base_url)),
    ))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let owner_id = owner_from_headers(&headers)?;

    let links = state.links.list_links(&owner_id).await?;

    Ok(Json(
        links
            .into_iter()
            .map(|l| LinkResponse::from_link(l, &state.base_url))
            .collect(),
    ))
}

/// Retrieves a single link by id.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.links.get_link(id).await?;
    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Deletes a link and its slug mapping.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// Returns 404 for an unknown id, including a repeated delete.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    state.links.delete_link(id).await?;
    Ok(Json(json!({ "message": "Short link deleted" })))
}
