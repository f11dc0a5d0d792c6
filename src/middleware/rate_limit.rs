//! IP-keyed request rate limiting.
//!
//! Uses a keyed governor limiter sized from [`RateLimitConfig`]: the
//! full allowance is available as burst and replenishes over the
//! window. The limiter is process-scoped state created at startup and
//! shared via [`AppState`]; a multi-instance deployment would need an
//! externally shared store, which this service does not provide.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::clock::{Clock, DefaultClock};
use governor::middleware::StateInformationMiddleware;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::RateLimiter;

use crate::config::rate_limit::RateLimitConfig;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub type ApiRateLimiter =
    RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock, StateInformationMiddleware>;

pub fn build_rate_limiter(config: &RateLimitConfig) -> Arc<ApiRateLimiter> {
    Arc::new(RateLimiter::keyed(config.quota()).with_middleware::<StateInformationMiddleware>())
}

/// Periodically evicts per-client state that has fully replenished, so
/// the keyed store does not grow without bound as client IPs churn.
/// Spawned once at startup; runs for the life of the process.
pub fn spawn_limiter_housekeeping(limiter: Arc<ApiRateLimiter>, period: std::time::Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            limiter.retain_recent();
            limiter.shrink_to_fit();
        }
    });
}

/// Resolves the client IP for rate-limit keying.
///
/// Precedence: `X-Real-IP`, first entry of `X-Forwarded-For`,
/// `CF-Connecting-IP`, the raw socket address, then a literal fallback.
pub fn resolve_client_ip(headers: &HeaderMap, socket_addr: Option<SocketAddr>) -> String {
    if let Some(ip) = header_value(headers, "x-real-ip") {
        return ip;
    }

    if let Some(forwarded) = header_value(headers, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(ip) = header_value(headers, "cf-connecting-ip") {
        return ip;
    }

    socket_addr
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let socket_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    let key = resolve_client_ip(req.headers(), socket_addr);

    match state.rate_limiter.check_key(&key) {
        Ok(snapshot) => {
            let limit = snapshot.quota().burst_size().get();
            let remaining = snapshot.remaining_burst_capacity();

            let mut response = next.run(req).await;
            let headers = response.headers_mut();
            headers.insert("x-ratelimit-limit", HeaderValue::from(limit));
            headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
            response
        }
        Err(not_until) => {
            let wait_secs = not_until
                .wait_time_from(DefaultClock::default().now())
                .as_secs();

            tracing::warn!(client_ip = %key, "Rate limit exceeded");

            let mut response =
                AppError::too_many_requests("Too many requests, please try again later")
                    .into_response();
            response
                .headers_mut()
                .insert("retry-after", HeaderValue::from(wait_secs));
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        headers
    }

    #[test]
    fn test_x_real_ip_takes_precedence() {
        let headers = headers(&[
            ("x-real-ip", "10.0.0.1"),
            ("x-forwarded-for", "10.0.0.2, 10.0.0.3"),
            ("cf-connecting-ip", "10.0.0.4"),
        ]);
        assert_eq!(resolve_client_ip(&headers, None), "10.0.0.1");
    }

    #[test]
    fn test_forwarded_for_uses_first_entry_trimmed() {
        let headers = headers(&[("x-forwarded-for", " 10.0.0.2 , 10.0.0.3")]);
        assert_eq!(resolve_client_ip(&headers, None), "10.0.0.2");
    }

    #[test]
    fn test_cf_connecting_ip_fallback() {
        let headers = headers(&[("cf-connecting-ip", "10.0.0.4")]);
        assert_eq!(resolve_client_ip(&headers, None), "10.0.0.4");
    }

    #[test]
    fn test_socket_address_fallback() {
        let addr = "192.168.1.7:443".parse().unwrap();
        assert_eq!(resolve_client_ip(&HeaderMap::new(), Some(addr)), "192.168.1.7");
    }

    #[test]
    fn test_literal_fallback_when_nothing_resolves() {
        assert_eq!(resolve_client_ip(&HeaderMap::new(), None), "unknown");
    }

    #[test]
    fn test_limiter_rejects_after_burst() {
        let config = RateLimitConfig {
            window_secs: 60,
            max_requests: 2,
        };
        let limiter = build_rate_limiter(&config);
        let key = "10.1.1.1".to_string();

        assert!(limiter.check_key(&key).is_ok());
        assert!(limiter.check_key(&key).is_ok());
        assert!(limiter.check_key(&key).is_err());

        // A different key has its own bucket.
        assert!(limiter.check_key(&"10.1.1.2".to_string()).is_ok());
    }

    #[test]
    fn test_retain_recent_keeps_active_client_state() {
        let limiter = build_rate_limiter(&RateLimitConfig::default());
        assert!(limiter.check_key(&"10.2.0.1".to_string()).is_ok());
        assert!(limiter.check_key(&"10.2.0.2".to_string()).is_ok());
        assert_eq!(limiter.len(), 2);

        // Eviction only touches state old enough to have fully
        // replenished; clients seen within the window survive.
        limiter.retain_recent();
        limiter.shrink_to_fit();
        assert_eq!(limiter.len(), 2);
        assert!(limiter.check_key(&"10.2.0.1".to_string()).is_ok());
    }
}
