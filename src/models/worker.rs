//! Modelo de Worker
//!
//! Trabajadores de campo, supervisores y administradores del sistema.
//! Mapea exactamente a la tabla workers del schema.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use uuid::Uuid;

/// Rol del trabajador - mapea al ENUM worker_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "worker_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Supervisor,
    Worker,
}

impl Role {
    /// Solo los trabajadores de campo pueden recibir asignaciones de vehículo
    pub fn can_hold_assignments(&self) -> bool {
        matches!(self, Role::Worker)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Supervisor => write!(f, "supervisor"),
            Role::Worker => write!(f, "worker"),
        }
    }
}

/// Estado del trabajador - mapea al ENUM worker_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "worker_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    Active,
    Inactive,
    Suspended,
}

/// Worker - mapea exactamente a la tabla workers
#[derive(Debug, Clone, FromRow)]
pub struct Worker {
    pub id: Uuid,
    pub role: Role,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub lastname: String,
    pub badge_number: Option<String>,
    pub rank: Option<String>,
    pub status: WorkerStatus,
    pub phone_number: Option<String>,
    pub birth_date: NaiveDate,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Worker {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.lastname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_roundtrip() {
        let json = serde_json::to_string(&Role::Supervisor).unwrap();
        assert_eq!(json, "\"supervisor\"");
        let role: Role = serde_json::from_str("\"worker\"").unwrap();
        assert_eq!(role, Role::Worker);
    }

    #[test]
    fn test_only_field_workers_hold_assignments() {
        assert!(Role::Worker.can_hold_assignments());
        assert!(!Role::Admin.can_hold_assignments());
        assert!(!Role::Supervisor.can_hold_assignments());
    }
}
