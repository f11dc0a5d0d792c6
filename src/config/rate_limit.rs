use std::num::NonZeroU32;
use std::time::Duration;

use governor::Quota;

/// Rate limit policy: a rolling allowance of `max_requests` per
/// `window_secs`, keyed by client IP.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub window_secs: u64,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_requests: 20,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            window_secs: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
        }
    }

    /// Governor quota equivalent to the configured window: the full
    /// allowance is available as burst and replenishes evenly over the
    /// window.
    pub fn quota(&self) -> Quota {
        let max_requests = self.max_requests.max(1);
        let burst = NonZeroU32::new(max_requests).expect("burst size is non-zero");
        let period = Duration::from_secs(self.window_secs.max(1)) / max_requests;

        Quota::with_period(period)
            .expect("rate limit period is non-zero")
            .allow_burst(burst)
    }
}
