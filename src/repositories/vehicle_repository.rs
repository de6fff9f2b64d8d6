use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleQuery};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;
use crate::utils::pagination::PageParams;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateVehicleRequest) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, license_plate, model, year, color, corporation, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'active', $7, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.license_plate)
        .bind(&request.model)
        .bind(request.year)
        .bind(&request.color)
        .bind(&request.corporation)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_plate(&self, license_plate: &str) -> Result<Option<Vehicle>, AppError> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE license_plate = $1")
                .bind(license_plate)
                .fetch_optional(&self.pool)
                .await?;

        Ok(vehicle)
    }

    pub async fn plate_exists(
        &self,
        license_plate: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE license_plate = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(license_plate)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Listado con filtros y paginación; count y página en paralelo
    pub async fn list(
        &self,
        filters: &VehicleQuery,
        params: PageParams,
    ) -> Result<(Vec<Vehicle>, i64), AppError> {
        let where_clause = r#"
            ($1::vehicle_status IS NULL OR status = $1)
            AND ($2::text IS NULL OR license_plate ILIKE '%' || $2 || '%')
        "#;

        let list_query = format!(
            "SELECT * FROM vehicles WHERE {} ORDER BY created_at DESC LIMIT $3 OFFSET $4",
            where_clause
        );
        let count_query = format!("SELECT COUNT(*) FROM vehicles WHERE {}", where_clause);

        let vehicles_fut = sqlx::query_as::<_, Vehicle>(&list_query)
            .bind(filters.status)
            .bind(&filters.license_plate)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(&self.pool);

        let total_fut = sqlx::query_as::<_, (i64,)>(&count_query)
            .bind(filters.status)
            .bind(&filters.license_plate)
            .fetch_one(&self.pool);

        let (vehicles, total) = futures::try_join!(vehicles_fut, total_fut)?;

        Ok((vehicles, total.0))
    }

    /// Vehículos activos sin asignación activa (derivado de assignments)
    pub async fn available(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT v.* FROM vehicles v
            WHERE v.status = 'active'
              AND NOT EXISTS (
                  SELECT 1 FROM assignments a
                  WHERE a.vehicle_id = v.id
                    AND a.progress_status IN ('not_started', 'in_progress')
              )
            ORDER BY v.license_plate ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// Vehículo actualmente asignado a un trabajador (derivado de assignments)
    pub async fn find_assigned_to_worker(
        &self,
        worker_id: Uuid,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT v.* FROM vehicles v
            JOIN assignments a ON a.vehicle_id = v.id
            WHERE a.worker_id = $1
              AND a.progress_status IN ('not_started', 'in_progress')
            ORDER BY a.assigned_at DESC
            LIMIT 1
            "#,
        )
        .bind(worker_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("El vehículo solicitado no existe".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET license_plate = $2, model = $3, year = $4, color = $5,
                corporation = $6, status = $7, updated_at = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.license_plate.clone().unwrap_or(current.license_plate))
        .bind(request.model.clone().or(current.model))
        .bind(request.year.or(current.year))
        .bind(request.color.clone().or(current.color))
        .bind(request.corporation.clone().or(current.corporation))
        .bind(request.status.unwrap_or(current.status))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "El vehículo solicitado no existe".to_string(),
            ));
        }

        Ok(())
    }
}
