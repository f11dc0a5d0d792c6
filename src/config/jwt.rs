use std::env;
use std::sync::LazyLock;

use rand::RngCore;

// Process-lifetime fallback secrets, generated once. Tokens signed with
// a fallback become unverifiable after a restart; acceptable for
// single-instance deployments, documented as a limitation.
static FALLBACK_ACCESS_SECRET: LazyLock<String> = LazyLock::new(random_secret);
static FALLBACK_REFRESH_SECRET: LazyLock<String> = LazyLock::new(random_secret);

fn random_secret() -> String {
    let mut bytes = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access token lifetime in seconds.
    pub access_expires_in: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_expires_in: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            access_secret: env::var("JWT_ACCESS_SECRET")
                .unwrap_or_else(|_| FALLBACK_ACCESS_SECRET.clone()),
            refresh_secret: env::var("JWT_REFRESH_SECRET")
                .unwrap_or_else(|_| FALLBACK_REFRESH_SECRET.clone()),
            access_expires_in: env::var("JWT_ACCESS_EXPIRES_IN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            refresh_expires_in: env::var("JWT_REFRESH_EXPIRES_IN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_secret_is_stable_within_process() {
        assert_eq!(
            FALLBACK_ACCESS_SECRET.as_str(),
            FALLBACK_ACCESS_SECRET.as_str()
        );
        assert_eq!(FALLBACK_ACCESS_SECRET.len(), 128);
        assert_ne!(
            FALLBACK_ACCESS_SECRET.as_str(),
            FALLBACK_REFRESH_SECRET.as_str()
        );
    }
}
