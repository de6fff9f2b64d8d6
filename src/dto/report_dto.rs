use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::VehicleSummary;
use crate::dto::worker_dto::WorkerSummary;
use crate::models::report::{Report, ReportStatus, Severity};

// Request para crear un reporte
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub severity: Severity,
    pub comments: Option<String>,
    pub images: Option<Vec<String>>,
    pub reported_by_worker_id: Option<Uuid>,
    pub reported_by_vehicle_id: Option<Uuid>,
}

// Request para actualizar un reporte
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub status: Option<ReportStatus>,
    pub severity: Option<Severity>,
    pub comments: Option<String>,
    pub images: Option<Vec<String>>,
}

// Filtros del listado de reportes
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<ReportStatus>,
    pub severity: Option<Severity>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
}

// Búsqueda por ubicación (bounding box aproximado)
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Radio en kilómetros
    pub radius: Option<f64>,
}

// Response de reporte con las referencias expandidas
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub status: ReportStatus,
    pub severity: Severity,
    pub comments: Option<String>,
    pub images: Vec<String>,
    pub reported_by_worker: Option<WorkerSummary>,
    pub reported_by_vehicle: Option<VehicleSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resumen de reporte anidado en el detalle de vehículo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub status: ReportStatus,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl From<&Report> for ReportSummary {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            latitude: report.latitude,
            longitude: report.longitude,
            street: report.street.clone(),
            neighborhood: report.neighborhood.clone(),
            status: report.status,
            severity: report.severity,
            created_at: report.created_at,
        }
    }
}
