//! Middleware de rate limiting
//!
//! Ventana fija en memoria por IP de cliente, aplicado al árbol /api.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::environment::EnvironmentConfig;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Contador de requests por IP dentro de la ventana actual
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado compartido del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
}

impl RateLimitState {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests: config.rate_limit_requests,
            window_duration: Duration::from_secs(config.rate_limit_window),
        }
    }

    pub async fn check_rate_limit(&self, ip: &str) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar ventanas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if now.duration_since(info.window_start) >= self.window_duration {
            info.requests = 1;
            info.window_start = now;
            return Ok(());
        }

        if info.requests >= self.max_requests {
            return Err(AppError::RateLimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

/// Middleware de rate limiting por IP
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Detrás del proxy la IP real viene en X-Forwarded-For
    let ip = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    state.rate_limit.check_rate_limit(&ip).await?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_limit(max_requests: u32) -> RateLimitState {
        RateLimitState {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration: Duration::from_secs(60),
        }
    }

    #[tokio::test]
    async fn test_allows_requests_under_limit() {
        let state = state_with_limit(3);

        for _ in 0..3 {
            assert!(state.check_rate_limit("1.2.3.4").await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_rejects_requests_over_limit() {
        let state = state_with_limit(2);

        assert!(state.check_rate_limit("1.2.3.4").await.is_ok());
        assert!(state.check_rate_limit("1.2.3.4").await.is_ok());
        assert!(matches!(
            state.check_rate_limit("1.2.3.4").await,
            Err(AppError::RateLimitExceeded)
        ));
    }

    #[tokio::test]
    async fn test_limits_are_per_ip() {
        let state = state_with_limit(1);

        assert!(state.check_rate_limit("1.2.3.4").await.is_ok());
        assert!(state.check_rate_limit("5.6.7.8").await.is_ok());
    }
}
