//! Shared application state

use std::sync::Arc;

use shared::error::AppError;
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::config::Config;
use crate::db;

/// Shared application state, cheap to clone (pool and services are
/// internally reference-counted).
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT token service
    pub jwt: Arc<JwtService>,
}

impl AppState {
    /// Create the application state: open the database and apply migrations
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let pool = db::connect(&config.database_url).await?;
        let jwt = Arc::new(JwtService::new(&config.jwt_secret));
        Ok(Self { pool, jwt })
    }
}
