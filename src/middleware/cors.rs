//! CORS origin gate and header layer.
//!
//! The gate rejects disallowed origins with an explicit error envelope
//! instead of silently omitting CORS headers; browsers report the
//! failure either way but non-browser clients see a real error. The
//! [`CorsLayer`] beneath it answers preflights and sets response
//! headers for allowed origins, credentials permitted.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::CorsLayer;

use crate::config::cors::CorsConfig;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rejects requests whose `Origin` is present and not on the
/// allow-list. Requests without an `Origin` header (same-origin or
/// non-browser callers) pass through.
pub async fn cors_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if let Some(origin) = req.headers().get(header::ORIGIN) {
        let allowed = origin
            .to_str()
            .map(|origin| state.cors_config.allows(origin))
            .unwrap_or(false);

        if !allowed {
            return AppError::forbidden("Not allowed by CORS").into_response();
        }
    }

    next.run(req).await
}

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .allow_credentials(true)
}
