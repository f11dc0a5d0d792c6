//! Application router and middleware stack.
//!
//! Layer order (outermost first): request logging, rate limiting,
//! timeout, security headers, CORS gate, CORS headers, then routing.
//! Unknown routes fall through to an enveloped 404.

use axum::http::{HeaderValue, Uri, header};
use axum::{Router, middleware};
use tower_http::set_header::SetResponseHeaderLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::cors::{cors_gate, cors_layer};
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::middleware::timeout::timeout_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::classes::router::init_classes_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::health::init_health_router;
use crate::modules::students::router::init_students_router;
use crate::modules::transactions::router::init_transactions_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use crate::utils::errors::AppError;

async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {} not found", uri.path()))
}

pub fn init_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(init_health_router(state.clone()))
        .nest("/auth", init_auth_router(state.clone()))
        .nest("/users", init_users_router(state.clone()))
        .nest("/classes", init_classes_router(state.clone()))
        .nest("/courses", init_courses_router(state.clone()))
        .nest("/students", init_students_router(state.clone()))
        .nest("/transactions", init_transactions_router(state.clone()));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(&state.server_config.api_prefix, api)
        .fallback(not_found_handler)
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn_with_state(state.clone(), cors_gate))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("0"),
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            timeout_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(state, logging_middleware))
}
