use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::assignment_dto::AssignmentQuery;
use crate::dto::vehicle_dto::VehicleSummary;
use crate::dto::worker_dto::WorkerSummary;
use crate::models::assignment::{Assignment, Priority, ProgressStatus};
use crate::models::vehicle::Vehicle;
use crate::models::worker::{Role, Worker};
use crate::utils::errors::AppError;
use crate::utils::pagination::PageParams;

/// Fila de asignación con trabajador y vehículo resueltos via JOIN
#[derive(Debug, FromRow)]
pub struct AssignmentWithRefsRow {
    #[sqlx(flatten)]
    pub assignment: Assignment,
    pub w_name: String,
    pub w_lastname: String,
    pub w_email: String,
    pub w_badge_number: Option<String>,
    pub w_role: Role,
    pub v_license_plate: String,
    pub v_model: Option<String>,
    pub v_year: Option<i32>,
    pub v_color: Option<String>,
}

impl AssignmentWithRefsRow {
    pub fn worker_summary(&self) -> WorkerSummary {
        WorkerSummary {
            id: self.assignment.worker_id,
            name: self.w_name.clone(),
            lastname: self.w_lastname.clone(),
            email: self.w_email.clone(),
            badge_number: self.w_badge_number.clone(),
            role: self.w_role,
        }
    }

    pub fn vehicle_summary(&self) -> VehicleSummary {
        VehicleSummary {
            id: self.assignment.vehicle_id,
            license_plate: self.v_license_plate.clone(),
            model: self.v_model.clone(),
            year: self.v_year,
            color: self.v_color.clone(),
        }
    }
}

/// Asignación activa que ya reclama un vehículo, con el nombre de su
/// trabajador para el mensaje de conflicto
#[derive(Debug, FromRow)]
pub struct ActiveClaimRow {
    pub assignment_id: Uuid,
    pub worker_name: String,
    pub worker_lastname: String,
}

const ASSIGNMENT_WITH_REFS_SELECT: &str = r#"
    SELECT a.*,
           w.name AS w_name, w.lastname AS w_lastname, w.email AS w_email,
           w.badge_number AS w_badge_number, w.role AS w_role,
           v.license_plate AS v_license_plate, v.model AS v_model,
           v.year AS v_year, v.color AS v_color
    FROM assignments a
    JOIN workers w ON w.id = a.worker_id
    JOIN vehicles v ON v.id = a.vehicle_id
"#;

pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_with_refs(
        &self,
        id: Uuid,
    ) -> Result<Option<AssignmentWithRefsRow>, AppError> {
        let query = format!("{} WHERE a.id = $1", ASSIGNMENT_WITH_REFS_SELECT);

        let assignment = sqlx::query_as::<_, AssignmentWithRefsRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(assignment)
    }

    /// Listado con filtros y paginación; count y página en paralelo
    pub async fn list(
        &self,
        filters: &AssignmentQuery,
        params: PageParams,
    ) -> Result<(Vec<AssignmentWithRefsRow>, i64), AppError> {
        let where_clause = r#"
            ($1::progress_status IS NULL OR a.progress_status = $1)
            AND ($2::priority_level IS NULL OR a.priority = $2)
            AND ($3::uuid IS NULL OR a.worker_id = $3)
            AND ($4::uuid IS NULL OR a.vehicle_id = $4)
        "#;

        let list_query = format!(
            "{} WHERE {} ORDER BY a.assigned_at DESC LIMIT $5 OFFSET $6",
            ASSIGNMENT_WITH_REFS_SELECT, where_clause
        );
        let count_query = format!("SELECT COUNT(*) FROM assignments a WHERE {}", where_clause);

        let assignments_fut = sqlx::query_as::<_, AssignmentWithRefsRow>(&list_query)
            .bind(filters.progress_status)
            .bind(filters.priority)
            .bind(filters.worker_id)
            .bind(filters.vehicle_id)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(&self.pool);

        let total_fut = sqlx::query_as::<_, (i64,)>(&count_query)
            .bind(filters.progress_status)
            .bind(filters.priority)
            .bind(filters.worker_id)
            .bind(filters.vehicle_id)
            .fetch_one(&self.pool);

        let (assignments, total) = futures::try_join!(assignments_fut, total_fut)?;

        Ok((assignments, total.0))
    }

    /// Asignaciones del propio trabajador
    pub async fn list_for_worker(
        &self,
        worker_id: Uuid,
        progress_status: Option<ProgressStatus>,
        params: PageParams,
    ) -> Result<(Vec<AssignmentWithRefsRow>, i64), AppError> {
        let where_clause = r#"
            a.worker_id = $1
            AND ($2::progress_status IS NULL OR a.progress_status = $2)
        "#;

        let list_query = format!(
            "{} WHERE {} ORDER BY a.assigned_at DESC LIMIT $3 OFFSET $4",
            ASSIGNMENT_WITH_REFS_SELECT, where_clause
        );
        let count_query = format!("SELECT COUNT(*) FROM assignments a WHERE {}", where_clause);

        let assignments_fut = sqlx::query_as::<_, AssignmentWithRefsRow>(&list_query)
            .bind(worker_id)
            .bind(progress_status)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(&self.pool);

        let total_fut = sqlx::query_as::<_, (i64,)>(&count_query)
            .bind(worker_id)
            .bind(progress_status)
            .fetch_one(&self.pool);

        let (assignments, total) = futures::try_join!(assignments_fut, total_fut)?;

        Ok((assignments, total.0))
    }

    /// Asignaciones recientes de un vehículo (detalle)
    pub async fn recent_for_vehicle(
        &self,
        vehicle_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AssignmentWithRefsRow>, AppError> {
        let query = format!(
            "{} WHERE a.vehicle_id = $1 ORDER BY a.assigned_at DESC LIMIT $2",
            ASSIGNMENT_WITH_REFS_SELECT
        );

        let assignments = sqlx::query_as::<_, AssignmentWithRefsRow>(&query)
            .bind(vehicle_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(assignments)
    }

    /// Asignaciones recientes de un trabajador (detalle)
    pub async fn recent_for_worker(
        &self,
        worker_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AssignmentWithRefsRow>, AppError> {
        let query = format!(
            "{} WHERE a.worker_id = $1 ORDER BY a.assigned_at DESC LIMIT $2",
            ASSIGNMENT_WITH_REFS_SELECT
        );

        let assignments = sqlx::query_as::<_, AssignmentWithRefsRow>(&query)
            .bind(worker_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(assignments)
    }

    /// Asignaciones activas que bloquean el borrado de un trabajador
    pub async fn count_active_for_worker(&self, worker_id: Uuid) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM assignments
            WHERE worker_id = $1 AND progress_status IN ('not_started', 'in_progress')
            "#,
        )
        .bind(worker_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Asignaciones activas que bloquean el borrado de un vehículo
    pub async fn count_active_for_vehicle(&self, vehicle_id: Uuid) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM assignments
            WHERE vehicle_id = $1 AND progress_status IN ('not_started', 'in_progress')
            "#,
        )
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Totales agrupados por estado y prioridad
    pub async fn stats(
        &self,
    ) -> Result<(i64, Vec<(ProgressStatus, i64)>, Vec<(Priority, i64)>), AppError> {
        let total_fut = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM assignments")
            .fetch_one(&self.pool);

        let by_status_fut = sqlx::query_as::<_, (ProgressStatus, i64)>(
            "SELECT progress_status, COUNT(*) FROM assignments GROUP BY progress_status",
        )
        .fetch_all(&self.pool);

        let by_priority_fut = sqlx::query_as::<_, (Priority, i64)>(
            "SELECT priority, COUNT(*) FROM assignments GROUP BY priority",
        )
        .fetch_all(&self.pool);

        let (total, by_status, by_priority) =
            futures::try_join!(total_fut, by_status_fut, by_priority_fut)?;

        Ok((total.0, by_status, by_priority))
    }

    // ------------------------------------------------------------------
    // Operaciones transaccionales: la secuencia leer-validar-escribir del
    // ciclo de vida de asignaciones corre completa dentro de una sola
    // transacción, así que estas funciones reciben la conexión abierta.
    // ------------------------------------------------------------------

    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Assignment>, AppError> {
        let assignment =
            sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(assignment)
    }

    pub async fn find_worker_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Worker>, AppError> {
        let worker = sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(worker)
    }

    pub async fn find_vehicle_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(vehicle)
    }

    /// Otra asignación activa que ya reclama el vehículo (exclusividad).
    /// `exclude_assignment_id` evita que una asignación en actualización
    /// entre en conflicto consigo misma.
    pub async fn find_active_claim_tx(
        conn: &mut PgConnection,
        vehicle_id: Uuid,
        exclude_assignment_id: Option<Uuid>,
    ) -> Result<Option<ActiveClaimRow>, AppError> {
        let claim = sqlx::query_as::<_, ActiveClaimRow>(
            r#"
            SELECT a.id AS assignment_id, w.name AS worker_name, w.lastname AS worker_lastname
            FROM assignments a
            JOIN workers w ON w.id = a.worker_id
            WHERE a.vehicle_id = $1
              AND a.progress_status IN ('not_started', 'in_progress')
              AND ($2::uuid IS NULL OR a.id <> $2)
            LIMIT 1
            "#,
        )
        .bind(vehicle_id)
        .bind(exclude_assignment_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(claim)
    }

    /// Otro vehículo con la misma matrícula ya en manos del trabajador
    /// (duplicado de captura del mismo vehículo físico bajo dos ids)
    pub async fn find_duplicate_plate_tx(
        conn: &mut PgConnection,
        worker_id: Uuid,
        license_plate: &str,
        exclude_vehicle_id: Uuid,
        exclude_assignment_id: Option<Uuid>,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT v.* FROM vehicles v
            JOIN assignments a ON a.vehicle_id = v.id
            WHERE a.worker_id = $1
              AND a.progress_status IN ('not_started', 'in_progress')
              AND v.license_plate = $2
              AND v.id <> $3
              AND ($4::uuid IS NULL OR a.id <> $4)
            LIMIT 1
            "#,
        )
        .bind(worker_id)
        .bind(license_plate)
        .bind(exclude_vehicle_id)
        .bind(exclude_assignment_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(vehicle)
    }

    pub async fn insert_tx(
        conn: &mut PgConnection,
        worker_id: Uuid,
        vehicle_id: Uuid,
        priority: Priority,
        notes: Option<String>,
    ) -> Result<Assignment, AppError> {
        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments
                (id, worker_id, vehicle_id, progress_status, priority, assigned_at, completed_at, notes)
            VALUES ($1, $2, $3, 'not_started', $4, $5, NULL, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(worker_id)
        .bind(vehicle_id)
        .bind(priority)
        .bind(Utc::now())
        .bind(notes)
        .fetch_one(&mut *conn)
        .await?;

        Ok(assignment)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_tx(
        conn: &mut PgConnection,
        id: Uuid,
        worker_id: Uuid,
        vehicle_id: Uuid,
        progress_status: ProgressStatus,
        priority: Priority,
        completed_at: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> Result<Assignment, AppError> {
        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            UPDATE assignments
            SET worker_id = $2, vehicle_id = $3, progress_status = $4,
                priority = $5, completed_at = $6, notes = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(worker_id)
        .bind(vehicle_id)
        .bind(progress_status)
        .bind(priority)
        .bind(completed_at)
        .bind(notes)
        .fetch_one(&mut *conn)
        .await?;

        Ok(assignment)
    }

    pub async fn delete_tx(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}
