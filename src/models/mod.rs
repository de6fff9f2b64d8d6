//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL.

pub mod assignment;
pub mod auth;
pub mod report;
pub mod vehicle;
pub mod worker;
