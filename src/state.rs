//! Shared application state
//!
//! Estado compartido de la aplicación que se pasa a través del router de
//! Axum. El pool es el único recurso compartido entre requests; los
//! controllers lo reciben explícitamente en su construcción.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let rate_limit = RateLimitState::new(&config);

        Self {
            pool,
            config,
            rate_limit,
        }
    }
}
