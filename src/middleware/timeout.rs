//! Request timeout enforcement.
//!
//! Cooperative: the elapsed timer resolves the request with a 503
//! envelope but does not abort work a handler already spawned. All
//! in-pipeline futures are dropped at that point.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;
use crate::utils::errors::AppError;

pub async fn timeout_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let duration = state.server_config.request_timeout;

    match tokio::time::timeout(duration, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(timeout_secs = duration.as_secs(), "Request timed out");
            AppError::timeout().into_response()
        }
    }
}
