//! PostgreSQL connection pool initialization.
//!
//! The connection string is read from `DATABASE_URL`. The pool is
//! created lazily so the process can start (and serve health checks)
//! before the database accepts connections.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

use crate::utils::errors::AppError;

pub fn init_db_pool() -> Result<PgPool, AppError> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| AppError::misconfigured("DATABASE_URL must be set"))?;

    PgPoolOptions::new()
        .max_connections(10)
        .connect_lazy(&database_url)
        .map_err(|e| AppError::unexpected(anyhow::anyhow!("Failed to configure database: {}", e)))
}
