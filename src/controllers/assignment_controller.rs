//! Controller de asignaciones
//!
//! Ciclo de vida de la asignación trabajador↔vehículo y validación de
//! conflictos. Las mutaciones corren la secuencia completa
//! leer-validar-escribir dentro de una transacción; el índice parcial
//! assignments_one_active_per_vehicle convierte cualquier carrera residual
//! en una violación de unicidad (409).

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::assignment_dto::{
    AssignmentQuery, AssignmentResponse, AssignmentStatsResponse, CreateAssignmentRequest,
    MyAssignmentsQuery, PriorityCounts, StatusCounts, UpdateAssignmentRequest,
};
use crate::dto::common::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::models::assignment::{Assignment, Priority, ProgressStatus};
use crate::models::auth::AuthenticatedWorker;
use crate::models::vehicle::Vehicle;
use crate::models::worker::Worker;
use crate::repositories::assignment_repository::{AssignmentRepository, AssignmentWithRefsRow};
use crate::utils::errors::AppError;
use crate::utils::pagination::{get_pagination, Pagination};
use validator::Validate;

pub struct AssignmentController {
    pool: PgPool,
    repository: AssignmentRepository,
}

impl AssignmentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AssignmentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Verifica que el par trabajador/vehículo pueda asignarse.
    ///
    /// Pasos, en orden y con corte en el primer fallo:
    /// 1. el trabajador existe;
    /// 2. el vehículo existe;
    /// 3. el rol del trabajador admite asignaciones (admin/supervisor no);
    /// 4. ninguna *otra* asignación activa reclama ya el vehículo;
    /// 5. el trabajador no tiene en sus manos otro vehículo con la misma
    ///    matrícula (captura duplicada del mismo vehículo físico).
    ///
    /// `exclude_assignment_id` se pasa al revalidar una actualización para
    /// que la asignación no entre en conflicto consigo misma.
    async fn validate_assignment(
        conn: &mut PgConnection,
        worker_id: Uuid,
        vehicle_id: Uuid,
        exclude_assignment_id: Option<Uuid>,
    ) -> Result<(Worker, Vehicle), AppError> {
        let worker = AssignmentRepository::find_worker_tx(conn, worker_id)
            .await?
            .ok_or_else(|| AppError::NotFound("El trabajador solicitado no existe".to_string()))?;

        let vehicle = AssignmentRepository::find_vehicle_tx(conn, vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("El vehículo solicitado no existe".to_string()))?;

        if !worker.role.can_hold_assignments() {
            return Err(AppError::Forbidden(format!(
                "El trabajador {} tiene rol {} y no puede recibir asignaciones de vehículo",
                worker.full_name(),
                worker.role
            )));
        }

        if let Some(claim) = AssignmentRepository::find_active_claim_tx(
            conn,
            vehicle_id,
            exclude_assignment_id,
        )
        .await?
        {
            return Err(AppError::Conflict(format!(
                "El vehículo {} ya está asignado a {} {}",
                vehicle.license_plate, claim.worker_name, claim.worker_lastname
            )));
        }

        if AssignmentRepository::find_duplicate_plate_tx(
            conn,
            worker_id,
            &vehicle.license_plate,
            vehicle_id,
            exclude_assignment_id,
        )
        .await?
        .is_some()
        {
            return Err(AppError::Conflict(format!(
                "El trabajador {} ya tiene asignado otro vehículo con la matrícula {}",
                worker.full_name(),
                vehicle.license_plate
            )));
        }

        Ok((worker, vehicle))
    }

    pub async fn create(
        &self,
        request: CreateAssignmentRequest,
    ) -> Result<ApiResponse<AssignmentResponse>, AppError> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        Self::validate_assignment(&mut tx, request.worker_id, request.vehicle_id, None).await?;

        let assignment = AssignmentRepository::insert_tx(
            &mut tx,
            request.worker_id,
            request.vehicle_id,
            request.priority.unwrap_or(Priority::Medium),
            request.notes,
        )
        .await?;

        tx.commit().await?;

        let row = self.load_with_refs(assignment.id).await?;

        Ok(ApiResponse::new(
            "Asignación creada exitosamente",
            row_to_response(row),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        auth: &AuthenticatedWorker,
        request: UpdateAssignmentRequest,
    ) -> Result<ApiResponse<AssignmentResponse>, AppError> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let current = AssignmentRepository::find_by_id_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("La asignación solicitada no existe".to_string()))?;

        if !auth.is_admin_or_supervisor() {
            if current.worker_id != auth.worker_id {
                return Err(AppError::Forbidden(
                    "Solo puedes actualizar tus propias asignaciones".to_string(),
                ));
            }
            if request.touches_privileged_fields() {
                return Err(AppError::Forbidden(
                    "Un trabajador solo puede actualizar el progreso y las notas de su asignación"
                        .to_string(),
                ));
            }
        }

        // Ids no especificados toman los valores actuales antes de revalidar
        let worker_id = request.worker_id.unwrap_or(current.worker_id);
        let vehicle_id = request.vehicle_id.unwrap_or(current.vehicle_id);

        if request.changes_pairing() {
            Self::validate_assignment(&mut tx, worker_id, vehicle_id, Some(id)).await?;
        }

        let completed_at = resolve_completed_at(&current, &request, Utc::now());

        let assignment = AssignmentRepository::update_tx(
            &mut tx,
            id,
            worker_id,
            vehicle_id,
            request.progress_status.unwrap_or(current.progress_status),
            request.priority.unwrap_or(current.priority),
            completed_at,
            request.notes.or(current.notes),
        )
        .await?;

        tx.commit().await?;

        let row = self.load_with_refs(assignment.id).await?;

        Ok(ApiResponse::new(
            "Asignación actualizada exitosamente",
            row_to_response(row),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<MessageResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        let assignment = AssignmentRepository::find_by_id_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("La asignación solicitada no existe".to_string()))?;

        if assignment.progress_status == ProgressStatus::InProgress {
            return Err(AppError::Conflict(
                "No se puede eliminar una asignación en progreso".to_string(),
            ));
        }

        AssignmentRepository::delete_tx(&mut tx, id).await?;

        tx.commit().await?;

        Ok(MessageResponse::new("Asignación eliminada exitosamente"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ApiResponse<AssignmentResponse>, AppError> {
        let row = self
            .repository
            .find_with_refs(id)
            .await?
            .ok_or_else(|| AppError::NotFound("La asignación solicitada no existe".to_string()))?;

        Ok(ApiResponse::new(
            "Asignación obtenida exitosamente",
            row_to_response(row),
        ))
    }

    pub async fn list(
        &self,
        filters: AssignmentQuery,
    ) -> Result<PaginatedResponse<AssignmentResponse>, AppError> {
        let params = get_pagination(filters.page, filters.limit);
        let (rows, total) = self.repository.list(&filters, params).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(row_to_response).collect(),
            Pagination::new(params, total),
        ))
    }

    pub async fn list_for_worker(
        &self,
        worker_id: Uuid,
        filters: MyAssignmentsQuery,
    ) -> Result<PaginatedResponse<AssignmentResponse>, AppError> {
        let params = get_pagination(filters.page, filters.limit);
        let (rows, total) = self
            .repository
            .list_for_worker(worker_id, filters.progress_status, params)
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(row_to_response).collect(),
            Pagination::new(params, total),
        ))
    }

    pub async fn stats(&self) -> Result<ApiResponse<AssignmentStatsResponse>, AppError> {
        let (total, by_status, by_priority) = self.repository.stats().await?;

        let mut status_counts = StatusCounts::default();
        for (status, count) in by_status {
            match status {
                ProgressStatus::NotStarted => status_counts.not_started = count,
                ProgressStatus::InProgress => status_counts.in_progress = count,
                ProgressStatus::Completed => status_counts.completed = count,
                ProgressStatus::OnHold => status_counts.on_hold = count,
            }
        }

        let mut priority_counts = PriorityCounts::default();
        for (priority, count) in by_priority {
            match priority {
                Priority::High => priority_counts.high = count,
                Priority::Medium => priority_counts.medium = count,
                Priority::Low => priority_counts.low = count,
            }
        }

        Ok(ApiResponse::new(
            "Estadísticas de asignaciones obtenidas exitosamente",
            AssignmentStatsResponse {
                total,
                by_status: status_counts,
                by_priority: priority_counts,
            },
        ))
    }

    async fn load_with_refs(&self, id: Uuid) -> Result<AssignmentWithRefsRow, AppError> {
        self.repository
            .find_with_refs(id)
            .await?
            .ok_or_else(|| AppError::Internal("Asignación recién escrita no encontrada".to_string()))
    }
}

fn row_to_response(row: AssignmentWithRefsRow) -> AssignmentResponse {
    AssignmentResponse {
        id: row.assignment.id,
        worker: row.worker_summary(),
        vehicle: row.vehicle_summary(),
        progress_status: row.assignment.progress_status,
        priority: row.assignment.priority,
        assigned_at: row.assignment.assigned_at,
        completed_at: row.assignment.completed_at,
        notes: row.assignment.notes.clone(),
    }
}

/// Resuelve completed_at para un patch disperso.
///
/// Un valor explícito en el patch siempre gana. Marcar completed sin valor
/// explícito sella la hora actual. Salir de completed no limpia la marca.
fn resolve_completed_at(
    current: &Assignment,
    patch: &UpdateAssignmentRequest,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if patch.completed_at.is_some() {
        return patch.completed_at;
    }

    if patch.progress_status == Some(ProgressStatus::Completed) {
        return Some(now);
    }

    current.completed_at
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assignment(completed_at: Option<DateTime<Utc>>) -> Assignment {
        Assignment {
            id: Uuid::new_v4(),
            worker_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            progress_status: ProgressStatus::InProgress,
            priority: Priority::Medium,
            assigned_at: Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap(),
            completed_at,
            notes: None,
        }
    }

    #[test]
    fn test_completing_without_timestamp_seals_now() {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let patch = UpdateAssignmentRequest {
            progress_status: Some(ProgressStatus::Completed),
            ..Default::default()
        };

        assert_eq!(resolve_completed_at(&assignment(None), &patch, now), Some(now));
    }

    #[test]
    fn test_explicit_timestamp_wins() {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let explicit = Utc.with_ymd_and_hms(2025, 1, 31, 18, 30, 0).unwrap();
        let patch = UpdateAssignmentRequest {
            progress_status: Some(ProgressStatus::Completed),
            completed_at: Some(explicit),
            ..Default::default()
        };

        assert_eq!(
            resolve_completed_at(&assignment(None), &patch, now),
            Some(explicit)
        );
    }

    #[test]
    fn test_leaving_completed_keeps_previous_mark() {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let sealed = Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap();
        let patch = UpdateAssignmentRequest {
            progress_status: Some(ProgressStatus::OnHold),
            ..Default::default()
        };

        assert_eq!(
            resolve_completed_at(&assignment(Some(sealed)), &patch, now),
            Some(sealed)
        );
    }

    #[test]
    fn test_unrelated_patch_does_not_touch_mark() {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let patch = UpdateAssignmentRequest {
            notes: Some("cambio de notas".to_string()),
            ..Default::default()
        };

        assert_eq!(resolve_completed_at(&assignment(None), &patch, now), None);
    }

    #[test]
    fn test_privileged_field_detection() {
        let repair = UpdateAssignmentRequest {
            progress_status: Some(ProgressStatus::InProgress),
            notes: Some("en camino".to_string()),
            ..Default::default()
        };
        assert!(!repair.touches_privileged_fields());

        let reassign = UpdateAssignmentRequest {
            vehicle_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(reassign.touches_privileged_fields());
        assert!(reassign.changes_pairing());
    }
}
