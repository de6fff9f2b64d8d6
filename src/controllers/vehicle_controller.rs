//! Controller de vehículos
//!
//! CRUD con matrícula única y el guard de borrado dependiente. El
//! trabajador asignado se deriva siempre de assignments.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::assignment_dto::AssignmentWithWorker;
use crate::dto::common::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::dto::report_dto::ReportSummary;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleDetailResponse, VehicleQuery,
    VehicleResponse, VehicleSummary,
};
use crate::repositories::assignment_repository::AssignmentRepository;
use crate::repositories::report_repository::ReportRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::pagination::{get_pagination, Pagination};

pub struct VehicleController {
    vehicles: VehicleRepository,
    reports: ReportRepository,
    assignments: AssignmentRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            reports: ReportRepository::new(pool.clone()),
            assignments: AssignmentRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if self.vehicles.plate_exists(&request.license_plate, None).await? {
            return Err(AppError::Conflict(
                "Ya existe un vehículo con esta matrícula".to_string(),
            ));
        }

        let vehicle = self.vehicles.create(&request).await?;

        Ok(ApiResponse::new(
            "Vehículo creado exitosamente",
            VehicleResponse::from(vehicle),
        ))
    }

    pub async fn list(
        &self,
        filters: VehicleQuery,
    ) -> Result<PaginatedResponse<VehicleResponse>, AppError> {
        let params = get_pagination(filters.page, filters.limit);
        let (vehicles, total) = self.vehicles.list(&filters, params).await?;

        Ok(PaginatedResponse::new(
            vehicles.into_iter().map(VehicleResponse::from).collect(),
            Pagination::new(params, total),
        ))
    }

    pub async fn available(&self) -> Result<ApiResponse<Vec<VehicleSummary>>, AppError> {
        let vehicles = self.vehicles.available().await?;

        Ok(ApiResponse::new(
            "Vehículos disponibles obtenidos exitosamente",
            vehicles.iter().map(VehicleSummary::from).collect(),
        ))
    }

    pub async fn get_by_plate(
        &self,
        license_plate: &str,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self
            .vehicles
            .find_by_plate(license_plate)
            .await?
            .ok_or_else(|| AppError::NotFound("El vehículo solicitado no existe".to_string()))?;

        Ok(ApiResponse::new(
            "Vehículo obtenido exitosamente",
            VehicleResponse::from(vehicle),
        ))
    }

    pub async fn get_detail(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("El vehículo solicitado no existe".to_string()))?;

        let reports = self
            .reports
            .recent_for_vehicle(id, 10)
            .await?
            .iter()
            .map(ReportSummary::from)
            .collect();

        let assignment_rows = self.assignments.recent_for_vehicle(id, 10).await?;

        // El trabajador asignado es el de la asignación activa, si la hay
        let assigned_worker = assignment_rows
            .iter()
            .find(|row| row.assignment.progress_status.is_active())
            .map(|row| row.worker_summary());

        let assignments = assignment_rows
            .into_iter()
            .map(|row| AssignmentWithWorker {
                id: row.assignment.id,
                progress_status: row.assignment.progress_status,
                priority: row.assignment.priority,
                assigned_at: row.assignment.assigned_at,
                completed_at: row.assignment.completed_at,
                worker: row.worker_summary(),
            })
            .collect();

        Ok(ApiResponse::new(
            "Vehículo obtenido exitosamente",
            VehicleDetailResponse {
                vehicle: VehicleResponse::from(vehicle),
                assigned_worker,
                reports,
                assignments,
            },
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if let Some(ref plate) = request.license_plate {
            if self.vehicles.plate_exists(plate, Some(id)).await? {
                return Err(AppError::Conflict(
                    "Ya existe un vehículo con esta matrícula".to_string(),
                ));
            }
        }

        let vehicle = self.vehicles.update(id, &request).await?;

        Ok(ApiResponse::new(
            "Vehículo actualizado exitosamente",
            VehicleResponse::from(vehicle),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<MessageResponse, AppError> {
        let active = self.assignments.count_active_for_vehicle(id).await?;

        if active > 0 {
            return Err(AppError::Conflict(
                "El vehículo tiene asignaciones activas".to_string(),
            ));
        }

        self.vehicles.delete(id).await?;

        Ok(MessageResponse::new("Vehículo eliminado exitosamente"))
    }
}
