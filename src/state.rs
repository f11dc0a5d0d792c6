//! Shared application state assembled once at startup.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::basic_auth::BasicAuthConfig;
use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::email::EmailConfig;
use crate::config::jwt::JwtConfig;
use crate::config::rate_limit::RateLimitConfig;
use crate::config::server::ServerConfig;
use crate::middleware::rate_limit::{ApiRateLimiter, build_rate_limiter};
use crate::utils::errors::AppError;
use crate::utils::storage::{FileStorage, LocalFileStorage};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub basic_auth_config: BasicAuthConfig,
    pub rate_limit_config: RateLimitConfig,
    pub email_config: EmailConfig,
    pub server_config: ServerConfig,
    pub rate_limiter: Arc<ApiRateLimiter>,
    pub storage: Arc<dyn FileStorage>,
}

pub fn init_app_state() -> Result<AppState, AppError> {
    let server_config = ServerConfig::from_env();
    let rate_limit_config = RateLimitConfig::from_env();

    let upload_dir =
        PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()));
    let upload_base_url = env::var("UPLOAD_BASE_URL")
        .unwrap_or_else(|_| format!("http://localhost:{}/files", server_config.port));

    Ok(AppState {
        db: init_db_pool()?,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        basic_auth_config: BasicAuthConfig::from_env(),
        rate_limiter: build_rate_limiter(&rate_limit_config),
        rate_limit_config,
        email_config: EmailConfig::from_env(),
        server_config,
        storage: Arc::new(LocalFileStorage::new(upload_dir, upload_base_url)),
    })
}
