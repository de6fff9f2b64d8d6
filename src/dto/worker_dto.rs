use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::assignment_dto::AssignmentWithVehicle;
use crate::dto::vehicle_dto::VehicleSummary;
use crate::models::worker::{Role, Worker, WorkerStatus};

// Request para crear un trabajador
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkerRequest {
    pub role: Role,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub lastname: String,

    pub badge_number: Option<String>,
    pub rank: Option<String>,
    pub status: Option<WorkerStatus>,

    #[validate(length(min = 7, max = 20))]
    pub phone_number: Option<String>,

    pub birth_date: NaiveDate,

    #[validate(url)]
    pub photo_url: Option<String>,

    pub notes: Option<String>,
}

// Request para actualizar un trabajador
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkerRequest {
    pub role: Option<Role>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6))]
    pub password: Option<String>,

    #[validate(length(min = 1))]
    pub name: Option<String>,

    #[validate(length(min = 1))]
    pub lastname: Option<String>,

    pub badge_number: Option<String>,
    pub rank: Option<String>,
    pub status: Option<WorkerStatus>,

    #[validate(length(min = 7, max = 20))]
    pub phone_number: Option<String>,

    #[validate(url)]
    pub photo_url: Option<String>,

    pub notes: Option<String>,
}

impl UpdateWorkerRequest {
    /// Campos que un trabajador puede cambiar sobre su propio perfil.
    /// Todo lo demás requiere rol admin.
    pub fn touches_privileged_fields(&self) -> bool {
        self.role.is_some()
            || self.email.is_some()
            || self.status.is_some()
            || self.badge_number.is_some()
            || self.rank.is_some()
            || self.notes.is_some()
    }
}

// Filtros del listado de trabajadores
#[derive(Debug, Deserialize)]
pub struct WorkerQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub role: Option<Role>,
    pub status: Option<WorkerStatus>,
    pub name: Option<String>,
}

// Filtro del listado de trabajadores disponibles
#[derive(Debug, Deserialize)]
pub struct AvailableWorkersQuery {
    pub role: Option<Role>,
}

// Response de trabajador (sin password_hash)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerResponse {
    pub id: Uuid,
    pub role: Role,
    pub email: String,
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

impl From<Worker> for WorkerResponse {
    fn from(worker: Worker) -> Self {
        Self {
            id: worker.id,
            role: worker.role,
            email: worker.email,
            name: worker.name,
            lastname: worker.lastname,
            badge_number: worker.badge_number,
            rank: worker.rank,
            status: worker.status,
            phone_number: worker.phone_number,
            birth_date: worker.birth_date,
            photo_url: worker.photo_url,
            notes: worker.notes,
            created_at: worker.created_at,
            updated_at: worker.updated_at,
        }
    }
}

// Resumen de trabajador anidado en otras respuestas
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSummary {
    pub id: Uuid,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub badge_number: Option<String>,
    pub role: Role,
}

impl From<&Worker> for WorkerSummary {
    fn from(worker: &Worker) -> Self {
        Self {
            id: worker.id,
            name: worker.name.clone(),
            lastname: worker.lastname.clone(),
            email: worker.email.clone(),
            badge_number: worker.badge_number.clone(),
            role: worker.role,
        }
    }
}

// Detalle de trabajador con su vehículo actual (derivado de assignments)
// y sus asignaciones recientes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerDetailResponse {
    #[serde(flatten)]
    pub worker: WorkerResponse,
    pub vehicle_assigned: Option<VehicleSummary>,
    pub assignments: Vec<AssignmentWithVehicle>,
}
