use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::VehicleSummary;
use crate::models::worker::{Role, Worker, WorkerStatus};

// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// Datos del trabajador autenticado (sin password_hash)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthWorkerData {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub lastname: String,
    pub role: Role,
    pub status: WorkerStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Worker> for AuthWorkerData {
    fn from(worker: &Worker) -> Self {
        Self {
            id: worker.id,
            email: worker.email.clone(),
            name: worker.name.clone(),
            lastname: worker.lastname.clone(),
            role: worker.role,
            status: worker.status,
            created_at: worker.created_at,
        }
    }
}

// Response de login/registro. Para trabajadores de campo incluye el
// vehículo asignado que usa la app móvil.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub data: AuthWorkerData,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleSummary>,
}
