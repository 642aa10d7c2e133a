//! Handler for the health/readiness endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Reports service readiness and the active storage backend.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response codes
///
/// - **200 OK** - serving requests; `status` is `"healthy"` under the durable
///   backend and `"degraded"` under the in-memory fallback (the service works
///   but writes do not survive restart)
/// - **503 Service Unavailable** - click queue closed (worker gone)
///
/// The storage backend is fixed at startup; this endpoint is how external
/// monitors observe that the process came up in fallback mode.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage_check = CheckStatus {
        status: if state.backend.is_durable() {
            "ok"
        } else {
            "degraded"
        }
        .to_string(),
        message: Some(format!("Backend: {}", state.backend.as_str())),
    };

    let queue_check = if state.click_tx.is_closed() {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Click queue is closed".to_string()),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Capacity: {}", state.click_tx.capacity())),
        }
    };

    let queue_ok = queue_check.status == "ok";

    let response = HealthResponse {
        status: if !queue_ok {
            "unhealthy"
        } else if state.backend.is_durable() {
            "healthy"
        } else {
            "degraded"
        }
        .to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage: storage_check,
            click_queue: queue_check,
        },
    };

    if queue_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
