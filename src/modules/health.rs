//! Operational health endpoint, gated behind basic auth.

use std::sync::LazyLock;
use std::time::Instant;

use axum::{Router, extract::State, middleware, routing::get};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::instrument;

use crate::config::environment;
use crate::middleware::auth::basic_auth;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::{ApiResponse, ErrorResponse};

static STARTED_AT: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Service health and uptime
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 401, description = "Basic authentication required", body = ErrorResponse)
    ),
    security(("basic" = [])),
    tag = "Health"
)]
#[instrument(skip(_state))]
pub async fn health_check(
    State(_state): State<AppState>,
) -> Result<ApiResponse<Value>, AppError> {
    Ok(ApiResponse::success(
        "Service is healthy",
        json!({
            "uptime_secs": STARTED_AT.elapsed().as_secs(),
            "timestamp": Utc::now().to_rfc3339(),
            "environment": environment(),
        }),
    ))
}

pub fn init_health_router(state: AppState) -> Router<AppState> {
    // Anchor the uptime clock at router construction, not first call.
    LazyLock::force(&STARTED_AT);

    Router::new()
        .route("/health", get(health_check))
        .route_layer(middleware::from_fn_with_state(state, basic_auth))
}
