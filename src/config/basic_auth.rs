use std::env;

/// Credentials for operational endpoints protected by HTTP basic auth.
///
/// Both values are intentionally optional: a deployment without them is
/// a misconfiguration and the basic gate answers 500 rather than
/// falling back to an insecure default.
#[derive(Clone, Debug)]
pub struct BasicAuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl BasicAuthConfig {
    pub fn from_env() -> Self {
        Self {
            username: env::var("AUTH_USERNAME").ok(),
            password: env::var("AUTH_PASSWORD").ok(),
        }
    }
}
