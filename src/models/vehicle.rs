//! Modelo de Vehicle
//!
//! Vehículos de la flota. El trabajador actualmente asignado a un vehículo
//! no se guarda como puntero en la tabla: se deriva siempre de las filas
//! activas de assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Inactive,
    Maintenance,
}

/// Vehicle - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub license_plate: String,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub corporation: Option<String>,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
