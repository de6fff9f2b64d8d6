use chrono::Utc;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::report_dto::{CreateReportRequest, ReportQuery, UpdateReportRequest};
use crate::dto::vehicle_dto::VehicleSummary;
use crate::dto::worker_dto::WorkerSummary;
use crate::models::report::Report;
use crate::models::worker::Role;
use crate::utils::errors::AppError;
use crate::utils::pagination::PageParams;

/// Fila de reporte con las referencias del reportante resueltas
/// via LEFT JOIN
#[derive(Debug, FromRow)]
pub struct ReportWithRefsRow {
    #[sqlx(flatten)]
    pub report: Report,
    pub rw_id: Option<Uuid>,
    pub rw_name: Option<String>,
    pub rw_lastname: Option<String>,
    pub rw_email: Option<String>,
    pub rw_badge_number: Option<String>,
    pub rw_role: Option<Role>,
    pub rv_id: Option<Uuid>,
    pub rv_license_plate: Option<String>,
    pub rv_model: Option<String>,
    pub rv_year: Option<i32>,
    pub rv_color: Option<String>,
}

impl ReportWithRefsRow {
    pub fn reporter_worker(&self) -> Option<WorkerSummary> {
        Some(WorkerSummary {
            id: self.rw_id?,
            name: self.rw_name.clone()?,
            lastname: self.rw_lastname.clone()?,
            email: self.rw_email.clone()?,
            badge_number: self.rw_badge_number.clone(),
            role: self.rw_role?,
        })
    }

    pub fn reporter_vehicle(&self) -> Option<VehicleSummary> {
        Some(VehicleSummary {
            id: self.rv_id?,
            license_plate: self.rv_license_plate.clone()?,
            model: self.rv_model.clone(),
            year: self.rv_year,
            color: self.rv_color.clone(),
        })
    }
}

const REPORT_WITH_REFS_SELECT: &str = r#"
    SELECT r.*,
           w.id AS rw_id, w.name AS rw_name, w.lastname AS rw_lastname,
           w.email AS rw_email, w.badge_number AS rw_badge_number, w.role AS rw_role,
           v.id AS rv_id, v.license_plate AS rv_license_plate, v.model AS rv_model,
           v.year AS rv_year, v.color AS rv_color
    FROM reports r
    LEFT JOIN workers w ON w.id = r.reported_by_worker_id
    LEFT JOIN vehicles v ON v.id = r.reported_by_vehicle_id
"#;

pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateReportRequest) -> Result<Report, AppError> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports
                (id, latitude, longitude, street, neighborhood, city, state, postal_code,
                 description, date, status, severity, comments, images,
                 reported_by_worker_id, reported_by_vehicle_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'reported', $11, $12, $13, $14, $15, $16, $16)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(&request.street)
        .bind(&request.neighborhood)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.postal_code)
        .bind(&request.description)
        .bind(request.date)
        .bind(request.severity)
        .bind(&request.comments)
        .bind(request.images.clone().unwrap_or_default())
        .bind(request.reported_by_worker_id)
        .bind(request.reported_by_vehicle_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(report)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ReportWithRefsRow>, AppError> {
        let query = format!("{} WHERE r.id = $1", REPORT_WITH_REFS_SELECT);

        let report = sqlx::query_as::<_, ReportWithRefsRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(report)
    }

    /// Listado con filtros y paginación; count y página en paralelo
    pub async fn list(
        &self,
        filters: &ReportQuery,
        params: PageParams,
    ) -> Result<(Vec<ReportWithRefsRow>, i64), AppError> {
        let where_clause = r#"
            ($1::report_status IS NULL OR r.status = $1)
            AND ($2::report_severity IS NULL OR r.severity = $2)
            AND ($3::text IS NULL OR r.city ILIKE '%' || $3 || '%')
            AND ($4::text IS NULL OR r.neighborhood ILIKE '%' || $4 || '%')
        "#;

        let list_query = format!(
            "{} WHERE {} ORDER BY r.created_at DESC LIMIT $5 OFFSET $6",
            REPORT_WITH_REFS_SELECT, where_clause
        );
        let count_query = format!("SELECT COUNT(*) FROM reports r WHERE {}", where_clause);

        let reports_fut = sqlx::query_as::<_, ReportWithRefsRow>(&list_query)
            .bind(filters.status)
            .bind(filters.severity)
            .bind(&filters.city)
            .bind(&filters.neighborhood)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(&self.pool);

        let total_fut = sqlx::query_as::<_, (i64,)>(&count_query)
            .bind(filters.status)
            .bind(filters.severity)
            .bind(&filters.city)
            .bind(&filters.neighborhood)
            .fetch_one(&self.pool);

        let (reports, total) = futures::try_join!(reports_fut, total_fut)?;

        Ok((reports, total.0))
    }

    /// Bounding box aproximado: radio_km/111 grados en ambos ejes
    pub async fn by_location(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<ReportWithRefsRow>, AppError> {
        let delta = radius_km / 111.0;

        let query = format!(
            r#"{}
            WHERE r.latitude BETWEEN $1 AND $2
              AND r.longitude BETWEEN $3 AND $4
            ORDER BY r.created_at DESC
            "#,
            REPORT_WITH_REFS_SELECT
        );

        let reports = sqlx::query_as::<_, ReportWithRefsRow>(&query)
            .bind(latitude - delta)
            .bind(latitude + delta)
            .bind(longitude - delta)
            .bind(longitude + delta)
            .fetch_all(&self.pool)
            .await?;

        Ok(reports)
    }

    /// Reportes recientes levantados desde un vehículo
    pub async fn recent_for_vehicle(
        &self,
        vehicle_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Report>, AppError> {
        let reports = sqlx::query_as::<_, Report>(
            r#"
            SELECT * FROM reports
            WHERE reported_by_vehicle_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(vehicle_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateReportRequest,
    ) -> Result<Report, AppError> {
        let current_row = sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("El reporte solicitado no existe".to_string()))?;

        let report = sqlx::query_as::<_, Report>(
            r#"
            UPDATE reports
            SET latitude = $2, longitude = $3, street = $4, neighborhood = $5,
                city = $6, state = $7, postal_code = $8, description = $9,
                status = $10, severity = $11, comments = $12, images = $13,
                updated_at = $14
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.latitude.unwrap_or(current_row.latitude))
        .bind(request.longitude.unwrap_or(current_row.longitude))
        .bind(request.street.clone().or(current_row.street))
        .bind(request.neighborhood.clone().or(current_row.neighborhood))
        .bind(request.city.clone().or(current_row.city))
        .bind(request.state.clone().or(current_row.state))
        .bind(request.postal_code.clone().or(current_row.postal_code))
        .bind(request.description.clone().or(current_row.description))
        .bind(request.status.unwrap_or(current_row.status))
        .bind(request.severity.unwrap_or(current_row.severity))
        .bind(request.comments.clone().or(current_row.comments))
        .bind(request.images.clone().unwrap_or(current_row.images))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(report)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "El reporte solicitado no existe".to_string(),
            ));
        }

        Ok(())
    }
}
