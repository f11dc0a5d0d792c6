mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{TEST_BASIC_AUTH, test_app, test_app_with, test_state};
use studyhall::config::basic_auth::BasicAuthConfig;
use studyhall::middleware::auth::OptionalAuthUser;
use studyhall::utils::jwt::{Claims, TokenPayload, TokenType, sign_token};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_bearer_gate_rejects_missing_header() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/users/profile")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Authorization header missing or invalid");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_bearer_gate_rejects_non_bearer_scheme() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/users/profile")
        .header("authorization", TEST_BASIC_AUTH)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Authorization header missing or invalid");
}

#[tokio::test]
async fn test_bearer_gate_rejects_garbage_token() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/users/profile")
        .header("authorization", "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid or expired token");
}

/// Runs the optional bearer extractor against a request carrying the
/// given authorization header, returning any attached principal.
async fn optional_principal(authorization: Option<&str>) -> Option<Claims> {
    use axum::extract::FromRequestParts;

    let state = test_state();
    let mut builder = Request::builder().uri("/api/classes");
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    let (mut parts, ()) = builder.body(()).unwrap().into_parts();

    let OptionalAuthUser(principal) = OptionalAuthUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();
    principal
}

#[tokio::test]
async fn test_optional_bearer_falls_through_on_missing_header() {
    assert!(optional_principal(None).await.is_none());
}

#[tokio::test]
async fn test_optional_bearer_falls_through_on_non_bearer_scheme() {
    assert!(optional_principal(Some(TEST_BASIC_AUTH)).await.is_none());
}

#[tokio::test]
async fn test_optional_bearer_falls_through_on_garbage_token() {
    assert!(
        optional_principal(Some("Bearer not.a.token"))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_optional_bearer_rejects_refresh_token_silently() {
    let state = test_state();
    let payload = TokenPayload::new(uuid::Uuid::new_v4());
    let refresh = sign_token(&payload, TokenType::Refresh, &state.jwt_config).unwrap();

    let principal = optional_principal(Some(&format!("Bearer {refresh}"))).await;
    assert!(principal.is_none());
}

#[tokio::test]
async fn test_optional_bearer_attaches_principal_on_valid_token() {
    let state = test_state();
    let user_id = uuid::Uuid::new_v4();
    let access = sign_token(
        &TokenPayload::new(user_id),
        TokenType::Access,
        &state.jwt_config,
    )
    .unwrap();

    let principal = optional_principal(Some(&format!("Bearer {access}"))).await;
    let claims = principal.expect("a valid access token attaches a principal");
    assert_eq!(claims.user_id, user_id.to_string());
    assert_eq!(claims.token_type, TokenType::Access);
}

#[tokio::test]
async fn test_basic_gate_rejects_missing_header() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Authorization header is required");
}

#[tokio::test]
async fn test_basic_gate_rejects_bearer_scheme() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/health")
        .header("authorization", "Bearer whatever")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Basic authentication is required");
}

#[tokio::test]
async fn test_basic_gate_rejects_wrong_credentials() {
    let app = test_app();

    // base64("ops:wrong")
    let request = Request::builder()
        .uri("/api/health")
        .header("authorization", "Basic b3BzOndyb25n")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_basic_gate_reports_missing_configuration() {
    let mut state = test_state();
    state.basic_auth_config = BasicAuthConfig {
        username: None,
        password: None,
    };
    let app = test_app_with(state);

    let request = Request::builder()
        .uri("/api/health")
        .header("authorization", TEST_BASIC_AUTH)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Authentication configuration is missing");
}

#[tokio::test]
async fn test_health_succeeds_with_valid_basic_credentials() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/health")
        .header("authorization", TEST_BASIC_AUTH)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Service is healthy");
    assert!(body["data"]["environment"].is_string());
    assert!(body["data"]["uptime_secs"].is_number());
}

#[tokio::test]
async fn test_sign_in_requires_basic_auth_before_body_parsing() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/sign/in")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"email": "a@b.co", "password": "pw"}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Authorization header is required");
}

#[tokio::test]
async fn test_refresh_rejects_garbage_token_with_401() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/refresh")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"refresh_token": "not.a.token"}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_refresh_rejects_missing_field_with_400() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/refresh")
        .header("content-type", "application/json")
        .body(Body::from(json!({}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "refresh_token is required");
}
