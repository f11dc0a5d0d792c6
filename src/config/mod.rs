//! Configuration modules for the Studyhall API.
//!
//! Each submodule owns one aspect of configuration and loads it from
//! environment variables via a `from_env()` constructor:
//!
//! - [`basic_auth`]: credentials for operational endpoints
//! - [`cors`]: CORS origin allow-list
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`email`]: SMTP settings for outbound mail
//! - [`jwt`]: token secrets and expiry durations
//! - [`rate_limit`]: request rate limiting policy
//! - [`server`]: port, API prefix, environment, request timeout

use std::env;
use std::sync::LazyLock;

pub mod basic_auth;
pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod rate_limit;
pub mod server;

static APP_ENV: LazyLock<String> =
    LazyLock::new(|| env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()));

/// Whether the process runs with a production configuration. Read once
/// per process; controls error-detail redaction.
pub fn is_production() -> bool {
    APP_ENV.as_str() == "production"
}

/// The configured environment name, e.g. `development` or `production`.
pub fn environment() -> &'static str {
    APP_ENV.as_str()
}
