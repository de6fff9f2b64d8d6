use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::worker_dto::{CreateWorkerRequest, UpdateWorkerRequest, WorkerQuery};
use crate::models::worker::{Role, Worker, WorkerStatus};
use crate::utils::errors::AppError;
use crate::utils::pagination::PageParams;

pub struct WorkerRepository {
    pool: PgPool,
}

impl WorkerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        request: &CreateWorkerRequest,
        password_hash: String,
    ) -> Result<Worker, AppError> {
        let worker = sqlx::query_as::<_, Worker>(
            r#"
            INSERT INTO workers
                (id, role, email, password_hash, name, lastname, badge_number, rank,
                 status, phone_number, birth_date, photo_url, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.role)
        .bind(&request.email)
        .bind(password_hash)
        .bind(&request.name)
        .bind(&request.lastname)
        .bind(&request.badge_number)
        .bind(&request.rank)
        .bind(request.status.unwrap_or(WorkerStatus::Active))
        .bind(&request.phone_number)
        .bind(request.birth_date)
        .bind(&request.photo_url)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(worker)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Worker>, AppError> {
        let worker = sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(worker)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Worker>, AppError> {
        let worker = sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(worker)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM workers WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Listado con filtros y paginación; count y página en paralelo
    pub async fn list(
        &self,
        filters: &WorkerQuery,
        params: PageParams,
    ) -> Result<(Vec<Worker>, i64), AppError> {
        let where_clause = r#"
            ($1::worker_role IS NULL OR role = $1)
            AND ($2::worker_status IS NULL OR status = $2)
            AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%' OR lastname ILIKE '%' || $3 || '%')
        "#;

        let list_query = format!(
            "SELECT * FROM workers WHERE {} ORDER BY created_at DESC LIMIT $4 OFFSET $5",
            where_clause
        );
        let count_query = format!("SELECT COUNT(*) FROM workers WHERE {}", where_clause);

        let workers_fut = sqlx::query_as::<_, Worker>(&list_query)
            .bind(filters.role)
            .bind(filters.status)
            .bind(&filters.name)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(&self.pool);

        let total_fut = sqlx::query_as::<_, (i64,)>(&count_query)
            .bind(filters.role)
            .bind(filters.status)
            .bind(&filters.name)
            .fetch_one(&self.pool);

        let (workers, total) = futures::try_join!(workers_fut, total_fut)?;

        Ok((workers, total.0))
    }

    /// Trabajadores activos, para el selector de asignaciones
    pub async fn available(&self, role: Option<Role>) -> Result<Vec<Worker>, AppError> {
        let workers = sqlx::query_as::<_, Worker>(
            r#"
            SELECT * FROM workers
            WHERE status = 'active' AND ($1::worker_role IS NULL OR role = $1)
            ORDER BY lastname ASC, name ASC
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(workers)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateWorkerRequest,
        password_hash: Option<String>,
    ) -> Result<Worker, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("El trabajador solicitado no existe".to_string()))?;

        let worker = sqlx::query_as::<_, Worker>(
            r#"
            UPDATE workers
            SET role = $2, email = $3, password_hash = $4, name = $5, lastname = $6,
                badge_number = $7, rank = $8, status = $9, phone_number = $10,
                photo_url = $11, notes = $12, updated_at = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.role.unwrap_or(current.role))
        .bind(request.email.clone().unwrap_or(current.email))
        .bind(password_hash.unwrap_or(current.password_hash))
        .bind(request.name.clone().unwrap_or(current.name))
        .bind(request.lastname.clone().unwrap_or(current.lastname))
        .bind(request.badge_number.clone().or(current.badge_number))
        .bind(request.rank.clone().or(current.rank))
        .bind(request.status.unwrap_or(current.status))
        .bind(request.phone_number.clone().or(current.phone_number))
        .bind(request.photo_url.clone().or(current.photo_url))
        .bind(request.notes.clone().or(current.notes))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(worker)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM workers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "El trabajador solicitado no existe".to_string(),
            ));
        }

        Ok(())
    }
}
