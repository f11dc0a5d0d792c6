mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Router, middleware};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use common::{TEST_BASIC_AUTH, test_app, test_app_with, test_state};
use studyhall::config::rate_limit::RateLimitConfig;
use studyhall::middleware::rate_limit::build_rate_limiter;
use studyhall::middleware::timeout::timeout_middleware;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_unknown_route_returns_enveloped_404() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/nonexistent")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Route /api/nonexistent not found");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_unknown_route_outside_api_prefix() {
    let app = test_app();

    let request = Request::builder()
        .uri("/nowhere")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Route /nowhere not found");
}

#[tokio::test]
async fn test_security_headers_applied_to_every_response() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/nonexistent")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["referrer-policy"], "no-referrer");
    assert_eq!(headers["x-xss-protection"], "0");
}

#[tokio::test]
async fn test_cors_gate_rejects_unlisted_origin() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/health")
        .header("origin", "http://evil.test")
        .header("authorization", TEST_BASIC_AUTH)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Not allowed by CORS");
}

#[tokio::test]
async fn test_cors_allows_listed_origin_with_credentials() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/health")
        .header("origin", "http://allowed.test")
        .header("authorization", TEST_BASIC_AUTH)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://allowed.test"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn test_requests_without_origin_pass_the_cors_gate() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/health")
        .header("authorization", TEST_BASIC_AUTH)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limit_headers_and_rejection() {
    let mut state = test_state();
    state.rate_limit_config = RateLimitConfig {
        window_secs: 60,
        max_requests: 2,
    };
    state.rate_limiter = build_rate_limiter(&state.rate_limit_config);
    let app = test_app_with(state);

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(first.headers()["x-ratelimit-limit"], "2");
    assert_eq!(first.headers()["x-ratelimit-remaining"], "1");

    let second = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(second.headers()["x-ratelimit-remaining"], "0");

    let third = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(third.headers().contains_key("retry-after"));

    let body = body_json(third).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Too many requests, please try again later");
}

#[tokio::test]
async fn test_timeout_produces_503_envelope() {
    let mut state = test_state();
    state.server_config.request_timeout = Duration::from_millis(50);

    let app = Router::new()
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                "done"
            }),
        )
        .layer(middleware::from_fn_with_state(state, timeout_middleware));

    let request = Request::builder().uri("/slow").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Request timed out");
}

#[tokio::test]
async fn test_fast_requests_pass_the_timeout_layer() {
    let mut state = test_state();
    state.server_config.request_timeout = Duration::from_secs(5);

    let app = Router::new()
        .route("/fast", get(|| async { "done" }))
        .layer(middleware::from_fn_with_state(state, timeout_middleware));

    let request = Request::builder().uri("/fast").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
