use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::assignment_dto::AssignmentWithWorker;
use crate::dto::report_dto::ReportSummary;
use crate::dto::worker_dto::WorkerSummary;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::validation::LICENSE_PLATE_RE;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(regex(path = "LICENSE_PLATE_RE", message = "Formato de matrícula inválido"))]
    pub license_plate: String,

    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2030))]
    pub year: Option<i32>,

    pub color: Option<String>,
    pub corporation: Option<String>,
}

// Request para actualizar un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(regex(path = "LICENSE_PLATE_RE", message = "Formato de matrícula inválido"))]
    pub license_plate: Option<String>,

    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2030))]
    pub year: Option<i32>,

    pub color: Option<String>,
    pub corporation: Option<String>,
    pub status: Option<VehicleStatus>,
}

// Filtros del listado de vehículos
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<VehicleStatus>,
    pub license_plate: Option<String>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
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

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            license_plate: vehicle.license_plate,
            model: vehicle.model,
            year: vehicle.year,
            color: vehicle.color,
            corporation: vehicle.corporation,
            status: vehicle.status,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

// Resumen de vehículo anidado en otras respuestas
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub id: Uuid,
    pub license_plate: String,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
}

impl From<&Vehicle> for VehicleSummary {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            license_plate: vehicle.license_plate.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            color: vehicle.color.clone(),
        }
    }
}

// Detalle de vehículo con el trabajador asignado (derivado de assignments),
// reportes y asignaciones recientes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetailResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub assigned_worker: Option<WorkerSummary>,
    pub reports: Vec<ReportSummary>,
    pub assignments: Vec<AssignmentWithWorker>,
}
