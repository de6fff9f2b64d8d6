use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::VehicleSummary;
use crate::dto::worker_dto::WorkerSummary;
use crate::models::assignment::{Priority, ProgressStatus};

// Request para crear una asignación
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub worker_id: Uuid,
    pub vehicle_id: Uuid,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

// Request para actualizar una asignación (patch disperso: solo se aplica
// lo presente)
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    pub worker_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub progress_status: Option<ProgressStatus>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl UpdateAssignmentRequest {
    /// true cuando el patch cambia el par trabajador/vehículo y por lo
    /// tanto requiere revalidar conflictos
    pub fn changes_pairing(&self) -> bool {
        self.worker_id.is_some() || self.vehicle_id.is_some()
    }

    /// Campos que el trabajador asignado puede cambiar sobre su propia
    /// asignación; el resto es exclusivo de admin/supervisor
    pub fn touches_privileged_fields(&self) -> bool {
        self.worker_id.is_some() || self.vehicle_id.is_some() || self.priority.is_some()
    }
}

// Filtros del listado de asignaciones
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub progress_status: Option<ProgressStatus>,
    pub priority: Option<Priority>,
    pub worker_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
}

// Filtros de "mis asignaciones"
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyAssignmentsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub progress_status: Option<ProgressStatus>,
}

// Response de asignación con trabajador y vehículo expandidos
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub worker: WorkerSummary,
    pub vehicle: VehicleSummary,
    pub progress_status: ProgressStatus,
    pub priority: Priority,
    pub assigned_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

// Asignación con solo el vehículo expandido (detalle de trabajador)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentWithVehicle {
    pub id: Uuid,
    pub progress_status: ProgressStatus,
    pub priority: Priority,
    pub assigned_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub vehicle: VehicleSummary,
}

// Asignación con solo el trabajador expandido (detalle de vehículo)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentWithWorker {
    pub id: Uuid,
    pub progress_status: ProgressStatus,
    pub priority: Priority,
    pub assigned_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub worker: WorkerSummary,
}

// Estadísticas de asignaciones
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentStatsResponse {
    pub total: i64,
    pub by_status: StatusCounts,
    pub by_priority: PriorityCounts,
}

#[derive(Debug, Default, Serialize)]
pub struct StatusCounts {
    pub not_started: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub on_hold: i64,
}

#[derive(Debug, Default, Serialize)]
pub struct PriorityCounts {
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}
