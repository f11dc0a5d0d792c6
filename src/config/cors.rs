use std::env;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_listed_origin_only() {
        let config = CorsConfig {
            allowed_origins: vec![
                "http://allowed.com".to_string(),
                "http://another.com".to_string(),
            ],
        };

        assert!(config.allows("http://allowed.com"));
        assert!(config.allows("http://another.com"));
        assert!(!config.allows("http://evil.com"));
    }
}
