use std::env;
use std::time::Duration;

use crate::config::environment;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub api_prefix: String,
    pub env: String,
    /// After this, an in-flight request is answered with a timeout
    /// error regardless of downstream progress.
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            env: environment().to_string(),
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}
