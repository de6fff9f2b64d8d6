//! Controller de reportes de baches
//!
//! CRUD de proyección directa; sin invariantes propios. La búsqueda por
//! ubicación usa el bounding box aproximado de grados = km/111.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::dto::report_dto::{
    CreateReportRequest, LocationQuery, ReportQuery, ReportResponse, UpdateReportRequest,
};
use crate::repositories::report_repository::{ReportRepository, ReportWithRefsRow};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::repositories::worker_repository::WorkerRepository;
use crate::utils::errors::AppError;
use crate::utils::pagination::{get_pagination, Pagination};
use crate::utils::validation::validate_coordinates;

const DEFAULT_RADIUS_KM: f64 = 1.0;

pub struct ReportController {
    reports: ReportRepository,
    workers: WorkerRepository,
    vehicles: VehicleRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            reports: ReportRepository::new(pool.clone()),
            workers: WorkerRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateReportRequest,
    ) -> Result<ApiResponse<ReportResponse>, AppError> {
        request.validate()?;

        // Las referencias del reportante son opcionales pero deben existir
        if let Some(worker_id) = request.reported_by_worker_id {
            if self.workers.find_by_id(worker_id).await?.is_none() {
                return Err(AppError::NotFound(
                    "El trabajador reportante no existe".to_string(),
                ));
            }
        }

        if let Some(vehicle_id) = request.reported_by_vehicle_id {
            if self.vehicles.find_by_id(vehicle_id).await?.is_none() {
                return Err(AppError::NotFound(
                    "El vehículo reportante no existe".to_string(),
                ));
            }
        }

        let report = self.reports.create(&request).await?;
        let row = self
            .reports
            .find_by_id(report.id)
            .await?
            .ok_or_else(|| AppError::Internal("Reporte recién escrito no encontrado".to_string()))?;

        Ok(ApiResponse::new(
            "Reporte creado exitosamente",
            row_to_response(row),
        ))
    }

    pub async fn list(
        &self,
        filters: ReportQuery,
    ) -> Result<PaginatedResponse<ReportResponse>, AppError> {
        let params = get_pagination(filters.page, filters.limit);
        let (rows, total) = self.reports.list(&filters, params).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(row_to_response).collect(),
            Pagination::new(params, total),
        ))
    }

    pub async fn by_location(
        &self,
        query: LocationQuery,
    ) -> Result<ApiResponse<Vec<ReportResponse>>, AppError> {
        if validate_coordinates(query.latitude, query.longitude).is_err() {
            return Err(AppError::BadRequest(
                "Se requieren latitude y longitude válidas".to_string(),
            ));
        }

        let rows = self
            .reports
            .by_location(
                query.latitude,
                query.longitude,
                query.radius.unwrap_or(DEFAULT_RADIUS_KM),
            )
            .await?;

        Ok(ApiResponse::new(
            "Reportes por ubicación obtenidos exitosamente",
            rows.into_iter().map(row_to_response).collect(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ApiResponse<ReportResponse>, AppError> {
        let row = self
            .reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("El reporte solicitado no existe".to_string()))?;

        Ok(ApiResponse::new(
            "Reporte obtenido exitosamente",
            row_to_response(row),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateReportRequest,
    ) -> Result<ApiResponse<ReportResponse>, AppError> {
        request.validate()?;

        let report = self.reports.update(id, &request).await?;
        let row = self
            .reports
            .find_by_id(report.id)
            .await?
            .ok_or_else(|| AppError::Internal("Reporte recién escrito no encontrado".to_string()))?;

        Ok(ApiResponse::new(
            "Reporte actualizado exitosamente",
            row_to_response(row),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<MessageResponse, AppError> {
        self.reports.delete(id).await?;

        Ok(MessageResponse::new("Reporte eliminado exitosamente"))
    }
}

fn row_to_response(row: ReportWithRefsRow) -> ReportResponse {
    let reported_by_worker = row.reporter_worker();
    let reported_by_vehicle = row.reporter_vehicle();
    let report = row.report;

    ReportResponse {
        id: report.id,
        latitude: report.latitude,
        longitude: report.longitude,
        street: report.street,
        neighborhood: report.neighborhood,
        city: report.city,
        state: report.state,
        postal_code: report.postal_code,
        description: report.description,
        date: report.date,
        status: report.status,
        severity: report.severity,
        comments: report.comments,
        images: report.images,
        reported_by_worker,
        reported_by_vehicle,
        created_at: report.created_at,
        updated_at: report.updated_at,
    }
}
