//! Middleware del sistema
//!
//! Autenticación JWT, CORS y rate limiting.

pub mod auth;
pub mod cors;
pub mod rate_limit;
