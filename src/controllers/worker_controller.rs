//! Controller de trabajadores
//!
//! CRUD con el guard de borrado dependiente: un trabajador con
//! asignaciones activas no puede eliminarse.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::assignment_dto::AssignmentWithVehicle;
use crate::dto::common::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::dto::vehicle_dto::VehicleSummary;
use crate::dto::worker_dto::{
    AvailableWorkersQuery, CreateWorkerRequest, UpdateWorkerRequest, WorkerDetailResponse,
    WorkerQuery, WorkerResponse, WorkerSummary,
};
use crate::models::auth::AuthenticatedWorker;
use crate::repositories::assignment_repository::AssignmentRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::repositories::worker_repository::WorkerRepository;
use crate::utils::errors::AppError;
use crate::utils::pagination::{get_pagination, Pagination};
use crate::utils::password::hash_password;

pub struct WorkerController {
    workers: WorkerRepository,
    vehicles: VehicleRepository,
    assignments: AssignmentRepository,
}

impl WorkerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            workers: WorkerRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            assignments: AssignmentRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateWorkerRequest,
    ) -> Result<ApiResponse<WorkerResponse>, AppError> {
        request.validate()?;

        if self.workers.email_exists(&request.email).await? {
            return Err(AppError::Conflict(
                "Ya existe un trabajador con este email".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let worker = self.workers.create(&request, password_hash).await?;

        Ok(ApiResponse::new(
            "Trabajador creado exitosamente",
            WorkerResponse::from(worker),
        ))
    }

    pub async fn list(
        &self,
        filters: WorkerQuery,
    ) -> Result<PaginatedResponse<WorkerResponse>, AppError> {
        let params = get_pagination(filters.page, filters.limit);
        let (workers, total) = self.workers.list(&filters, params).await?;

        Ok(PaginatedResponse::new(
            workers.into_iter().map(WorkerResponse::from).collect(),
            Pagination::new(params, total),
        ))
    }

    pub async fn available(
        &self,
        filters: AvailableWorkersQuery,
    ) -> Result<ApiResponse<Vec<WorkerSummary>>, AppError> {
        let workers = self.workers.available(filters.role).await?;

        Ok(ApiResponse::new(
            "Trabajadores disponibles obtenidos exitosamente",
            workers.iter().map(WorkerSummary::from).collect(),
        ))
    }

    pub async fn get_detail(
        &self,
        id: Uuid,
        auth: &AuthenticatedWorker,
    ) -> Result<ApiResponse<WorkerDetailResponse>, AppError> {
        if !auth.is_admin_or_supervisor() && auth.worker_id != id {
            return Err(AppError::Forbidden(
                "Solo puedes consultar tu propio perfil".to_string(),
            ));
        }

        let worker = self
            .workers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("El trabajador solicitado no existe".to_string()))?;

        let vehicle_assigned = self
            .vehicles
            .find_assigned_to_worker(id)
            .await?
            .as_ref()
            .map(VehicleSummary::from);

        let assignments = self
            .assignments
            .recent_for_worker(id, 10)
            .await?
            .into_iter()
            .map(|row| AssignmentWithVehicle {
                id: row.assignment.id,
                progress_status: row.assignment.progress_status,
                priority: row.assignment.priority,
                assigned_at: row.assignment.assigned_at,
                completed_at: row.assignment.completed_at,
                vehicle: row.vehicle_summary(),
            })
            .collect();

        Ok(ApiResponse::new(
            "Trabajador obtenido exitosamente",
            WorkerDetailResponse {
                worker: WorkerResponse::from(worker),
                vehicle_assigned,
                assignments,
            },
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        auth: &AuthenticatedWorker,
        request: UpdateWorkerRequest,
    ) -> Result<ApiResponse<WorkerResponse>, AppError> {
        request.validate()?;

        if !auth.is_admin() {
            if auth.worker_id != id {
                return Err(AppError::Forbidden(
                    "Solo puedes actualizar tu propio perfil".to_string(),
                ));
            }
            if request.touches_privileged_fields() {
                return Err(AppError::Forbidden(
                    "Solo un administrador puede modificar rol, email o estado".to_string(),
                ));
            }
        }

        if let Some(ref email) = request.email {
            let current = self
                .workers
                .find_by_id(id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound("El trabajador solicitado no existe".to_string())
                })?;

            if *email != current.email && self.workers.email_exists(email).await? {
                return Err(AppError::Conflict(
                    "Ya existe un trabajador con este email".to_string(),
                ));
            }
        }

        let password_hash = match request.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let worker = self.workers.update(id, &request, password_hash).await?;

        Ok(ApiResponse::new(
            "Trabajador actualizado exitosamente",
            WorkerResponse::from(worker),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<MessageResponse, AppError> {
        let active = self.assignments.count_active_for_worker(id).await?;

        if active > 0 {
            return Err(AppError::Conflict(
                "El trabajador tiene asignaciones activas".to_string(),
            ));
        }

        self.workers.delete(id).await?;

        Ok(MessageResponse::new("Trabajador eliminado exitosamente"))
    }
}
